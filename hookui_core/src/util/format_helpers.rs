use std::{
    collections::BTreeMap,
    fmt::{Formatter, Result},
};

pub(crate) fn print_vec_len<T>(vec: &[T], fmt: &mut Formatter) -> Result {
    write!(fmt, "Vec {{ len() = {} }}", vec.len())
}

pub(crate) fn print_map_len<K, V>(map: &BTreeMap<K, V>, fmt: &mut Formatter) -> Result {
    write!(fmt, "BTreeMap {{ len() = {} }}", map.len())
}

pub(crate) fn escape_markup(text: &str, fmt: &mut Formatter) -> Result {
    for c in text.chars() {
        match c {
            '&' => fmt.write_str("&amp;")?,
            '<' => fmt.write_str("&lt;")?,
            '>' => fmt.write_str("&gt;")?,
            '"' => fmt.write_str("&quot;")?,
            c => write!(fmt, "{}", c)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    struct Lens(Vec<u8>, BTreeMap<u16, &'static str>);
    impl fmt::Debug for Lens {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
            print_vec_len(&self.0, f)?;
            write!(f, " ")?;
            print_map_len(&self.1, f)
        }
    }

    #[test]
    fn prints_only_the_length() {
        let lens = Lens(vec![1, 2, 3], vec![(0, "a")].into_iter().collect());
        assert_eq!(format!("{:?}", lens), "Vec { len() = 3 } BTreeMap { len() = 1 }");
    }
}
