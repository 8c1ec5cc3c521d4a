//! The demo component: a few state slots, a labeled one, a render-time
//! correction and four lifecycle hooks.

use crate::*;
use parking_lot::Mutex;
use std::sync::Arc;

pub const DEFAULT_NAME: &str = "Wako";
pub const CORRECTED_NAME: &str = "Zee";
pub const CORRECTED_OBJECT_NAME: &str = "Stefano";
pub const INITIAL_FIRST_NAME: &str = "Mario";
pub const CLICKED_FIRST_NAME: &str = "Juha";

pub const RE_RENDERED: &str = "re-rendered!";
pub const COUNTER_UPDATED: &str = "You updated the counter!";
pub const MOUNTED: &str = "this is pretty much a componentDidMount!";
pub const UNMOUNTING: &str = "bye bye from n'sync";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateObject {
    pub name: String,
    pub counter: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateObjectPatch {
    pub name: Option<String>,
    pub counter: Option<i64>,
}

impl Merge for StateObject {
    type Patch = StateObjectPatch;

    fn merge(&mut self, patch: StateObjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(counter) = patch.counter {
            self.counter = counter;
        }
    }
}

/// The state a render pass of the panel saw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    pub name: String,
    pub counter: i64,
    pub reservations: Vec<String>,
    pub state_object: StateObject,
    pub first_name: String,
}

#[derive(Debug, Default)]
struct JournalInner {
    messages: Vec<&'static str>,
    last_render: Option<PanelState>,
}

/// Where the panel reports what happened to it. Lifecycle messages are logged
/// and remembered, so they can be counted later.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<JournalInner>>);

impl Journal {
    pub fn record(&self, message: &'static str) {
        log::info!("{}", message);
        self.0.lock().messages.push(message);
    }

    pub fn messages(&self) -> Vec<&'static str> { self.0.lock().messages.clone() }

    pub fn count(&self, message: &str) -> usize {
        self.0.lock().messages.iter().filter(|recorded| **recorded == message).count()
    }

    pub fn clear(&self) { self.0.lock().messages.clear(); }

    /// the state seen by the latest render pass, which is the committed one
    /// once an update cycle is over
    pub fn last_render(&self) -> Option<PanelState> { self.0.lock().last_render.clone() }

    fn rendered(&self, state: PanelState) { self.0.lock().last_render = Some(state); }
}

pub fn panel(journal: Journal) -> impl Fn(&mut WidgetContext) -> Node {
    move |context: &mut WidgetContext| render(context, &journal)
}

fn render(context: &mut WidgetContext, journal: &Journal) -> Node {
    let (name, set_name) = context.state(DEFAULT_NAME.to_string());
    let (counter, set_counter) = context.state(0i64);
    let (reservations, _set_reservations) = context.state(Vec::<String>::new());
    let (state_object, set_state_object) = context.state(StateObject::default());

    // the guard keeps this from queueing updates on every pass
    if name == DEFAULT_NAME {
        context.shout(set_name, CORRECTED_NAME.to_string());
        context.shout_merge(
            set_state_object,
            StateObjectPatch { name: Some(CORRECTED_OBJECT_NAME.to_string()), ..Default::default() },
        );
    }

    let (first_name, set_first_name) =
        context.labeled_state(INITIAL_FIRST_NAME.to_string(), "firstName");

    let increment = move |context: &CallbackContext| context.shout(set_counter, counter + 1);
    let decrement = move |context: &CallbackContext| context.shout(set_counter, counter - 1);

    let log = journal.clone();
    context.after_frame(move |_| log.record(RE_RENDERED));

    let log = journal.clone();
    context.effect(move |_| log.record(COUNTER_UPDATED), counter);

    let log = journal.clone();
    context.effect(move |_| log.record(MOUNTED), ());

    let log = journal.clone();
    context.effect(move |_| Cleanup::new(move || log.record(UNMOUNTING)), ());

    journal.rendered(PanelState {
        name,
        counter,
        reservations,
        state_object: state_object.clone(),
        first_name: first_name.clone(),
    });

    div()
        .class("App")
        .child(
            header().class("App-header").children(vec![
                Node::from(
                    heading(1)
                        .name("first-name")
                        .on_click(move |context| {
                            context.shout(set_first_name, CLICKED_FIRST_NAME.to_string())
                        })
                        .child(text(first_name)),
                ),
                Node::from(heading(3).child(text(state_object.name))),
                Node::from(line(button(ButtonVariant::Success, "increment", increment, text("+")))),
                Node::from(div().name("counter").child(text(counter))),
                Node::from(line(button(ButtonVariant::Success, "decrement", decrement, text("-")))),
            ]),
        )
        .into()
}
