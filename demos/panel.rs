use hookui::{
    panel::{panel, Journal},
    Evaluator,
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let journal = Journal::default();
    let mut evaluator = Evaluator::new(panel(journal.clone()))?;
    print_page(&evaluator);

    for _ in 0..3 {
        evaluator.click("increment")?;
    }
    evaluator.click("first-name")?;
    print_page(&evaluator);

    for value in evaluator.debug_values() {
        println!("debug value #{} (revision {}): {}", value.hook, value.revision, value.label);
    }

    evaluator.unmount()?;
    println!("lifecycle: {:?}", journal.messages());
    Ok(())
}

fn print_page(evaluator: &Evaluator) {
    if let Some(page) = evaluator.rendered() {
        println!("{}", page);
    }
}
