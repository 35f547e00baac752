//! Visibility as "has an offset parent".

use anyhow::{Context as _, Result};
use dom_utils::{Document, ElementAdapter as _, LayoutBox, NodeId, is_visible};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn page() -> Result<(Document, NodeId)> {
    let doc = Document::from_html(
        r#"<html><body><main><div class="card"><span>text</span></div></main></body></html>"#,
    )?;
    let body = doc.body().context("no body")?;
    let main = doc.first_element_child(body).context("no main")?;
    let card = doc.first_element_child(main).context("no card")?;
    Ok((doc, card))
}

#[test]
fn absent_element_is_not_visible() {
    init_logging();
    let doc = Document::new();
    assert!(!is_visible(&doc, None));
}

#[test]
fn attached_rendered_element_is_visible() -> Result<()> {
    init_logging();
    let (doc, card) = page()?;
    assert!(is_visible(&doc, Some(card)));
    let span = doc.first_element_child(card).context("no span")?;
    assert!(is_visible(&doc, Some(span)));
    Ok(())
}

#[test]
fn display_none_hides_the_subtree() -> Result<()> {
    init_logging();
    let (mut doc, card) = page()?;
    let span = doc.first_element_child(card).context("no span")?;
    doc.set_style(card, "display", "none");
    assert!(!is_visible(&doc, Some(card)));
    assert!(!is_visible(&doc, Some(span)));
    doc.remove_style(card, "display");
    assert!(is_visible(&doc, Some(span)));
    Ok(())
}

#[test]
fn detached_element_is_not_visible() -> Result<()> {
    init_logging();
    let (mut doc, card) = page()?;
    doc.detach(card);
    assert!(!is_visible(&doc, Some(card)));
    let fresh = doc.create_element("div");
    assert!(!is_visible(&doc, Some(fresh)));
    Ok(())
}

#[test]
fn zero_sized_elements_still_count() -> Result<()> {
    init_logging();
    let (mut doc, card) = page()?;
    doc.set_layout(card, LayoutBox::new(0.0, 0.0));
    doc.set_style(card, "visibility", "hidden");
    assert!(is_visible(&doc, Some(card)));
    Ok(())
}

#[test]
fn head_content_is_never_visible() -> Result<()> {
    init_logging();
    let doc = Document::from_html("<html><head><title>t</title></head><body></body></html>")?;
    let html = doc.document_element().context("no html")?;
    let head = doc.first_element_child(html).context("no head")?;
    let title = doc.first_element_child(head).context("no title")?;
    assert!(!is_visible(&doc, Some(title)));
    Ok(())
}

#[test]
fn cyclic_append_is_refused() -> Result<()> {
    init_logging();
    let (mut doc, card) = page()?;
    let html = doc.document_element().context("no html")?;
    assert!(!doc.append_child(card, html));
    assert_eq!(doc.document_element(), Some(html));
    assert!(is_visible(&doc, Some(card)));
    Ok(())
}

#[test]
fn repeated_checks_agree() -> Result<()> {
    init_logging();
    let (mut doc, card) = page()?;
    let first = is_visible(&doc, Some(card));
    assert_eq!(is_visible(&doc, Some(card)), first);
    doc.set_style(card, "display", "none");
    let hidden = is_visible(&doc, Some(card));
    assert!(!hidden);
    assert_eq!(is_visible(&doc, Some(card)), hidden);
    Ok(())
}
