pub mod delta_eval;
pub mod fragment;
