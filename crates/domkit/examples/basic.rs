//! Basic domkit usage

use domkit::dom::Platform;
use domkit::{DocumentExt, NodeListExt, StrExt};

fn main() -> domkit::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let registry = domkit::install(&Platform::default());
    println!("domkit v{} installed {} capabilities", domkit::CAPABILITY_VERSION, registry.len());

    let mut doc = domkit::html::parse(
        "<ul class=\"menu\"><li>one</li><li>two</li><li>three</li></ul>",
    )?;
    doc.ext().ready(|_| println!("DOM ready"));
    doc.finish_parsing();

    let items = doc.ext().find_all("ul.menu li")?;
    items.each(|item, index| println!("{index}: {:?}", item));

    if let Some(last) = items.get(-1) {
        doc.el(last).add_class("last")?.set_data("position", 3)?;
        println!("{}", doc.outer_html(last));
    }

    println!("{}", "Hello {{name}}".render("name", "domkit"));
    Ok(())
}
