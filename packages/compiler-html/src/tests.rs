use crate::{compile_to_html, CompileError, CompileOptions};
use chrono::{TimeZone, Utc};
use minisite_document::{
    Block, BlockContent, BlockId, BlockType, ButtonContent, PlanTier, Site, SiteId, Theme,
    TrackingConfig,
};
use minisite_editor::default_block;
use minisite_renderer::{RenderMode, Renderer, VNode, VisualTree};

fn site(kinds: &[BlockType]) -> Site {
    let now = Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap();
    let mut site = Site::new(SiteId::new("site-1"), "Ana", PlanTier::Pro);
    for kind in kinds {
        site.blocks.push(default_block(*kind, &Theme::dark(), now));
    }
    site
}

fn publish(site: &Site) -> VisualTree {
    Renderer::new(RenderMode::Publish).render(site, &site.theme)
}

#[test]
fn test_compile_published_page() {
    let site = site(&[BlockType::Header, BlockType::Text]);
    let html = compile_to_html(&publish(&site), CompileOptions::default()).expect("Failed to compile");

    println!("Generated HTML:\n{}", html);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<html lang=\"en\">"));
    assert!(html.contains("<title>New title | RS MiniSite</title>"));
    assert!(html.contains("<meta property=\"og:title\" content=\"New title | RS MiniSite\">"));
    assert!(html.contains("<meta name=\"description\" content=\"Write your text here...\">"));
    assert!(html.contains(&format!("data-block-id=\"{}\"", site.blocks[0].id)));
    assert!(html.contains("src=\"https://picsum.photos/200\""));
}

#[test]
fn test_preview_tree_uses_fallback_title() {
    let site = site(&[BlockType::Header]);
    let tree = Renderer::new(RenderMode::preview()).render(&site, &site.theme);
    let html = compile_to_html(&tree, CompileOptions::default()).unwrap();

    assert!(html.contains("<title>MiniSite</title>"));
    assert!(!html.contains("og:title"));
}

#[test]
fn test_compile_pixels_and_widgets() {
    let mut site = site(&[BlockType::Countdown]);
    site.tracking = Some(TrackingConfig {
        meta_pixel_id: Some("123".to_string()),
        ..Default::default()
    });

    let html = compile_to_html(&publish(&site), CompileOptions::default()).unwrap();
    assert!(html.contains(
        "<script async id=\"pixel-meta\" src=\"https://connect.facebook.net/en_US/fbevents.js\"></script>"
    ));
    assert!(html.contains("<script type=\"application/json\" id=\"minisite-widgets\">"));
    assert!(html.contains("\"kind\":\"countdown\""));
}

#[test]
fn test_compile_initializes_pixels_with_their_ids() {
    let mut site = site(&[]);
    site.tracking = Some(TrackingConfig {
        meta_pixel_id: Some("987654321".to_string()),
        pinterest_pixel_id: Some("2612".to_string()),
        ..Default::default()
    });

    let html = compile_to_html(&publish(&site), CompileOptions::default()).unwrap();
    assert!(html.contains("<script id=\"pixel-meta-init\">"));
    assert!(html.contains("fbq('init',\"987654321\")"));
    assert!(html.contains("pintrk('load',\"2612\")"));
    let init = html.find("pixel-meta-init").unwrap();
    let loader = html.find("id=\"pixel-meta\"").unwrap();
    assert!(init < loader);
}

#[test]
fn test_pixel_id_cannot_close_the_script() {
    let mut site = site(&[]);
    site.tracking = Some(TrackingConfig {
        tiktok_pixel_id: Some("x</script><script>alert(1)".to_string()),
        ..Default::default()
    });

    let html = compile_to_html(&publish(&site), CompileOptions::default()).unwrap();
    assert!(!html.contains("</script><script>alert(1)"));
    assert!(html.contains("ttq.load(\"x<\\/script><script>alert(1)\")"));
}

#[test]
fn test_text_and_attributes_are_escaped() {
    let mut site = Site::new(SiteId::new("s"), "Ana", PlanTier::Pro);
    site.blocks.push(Block::new(
        BlockId::new("b1"),
        BlockContent::Button(ButtonContent {
            label: "<script>alert('x')</script>".to_string(),
            url: "https://example.com/?a=1&b=\"2\"".to_string(),
            ..Default::default()
        }),
        Default::default(),
    ));

    let html = compile_to_html(&publish(&site), CompileOptions::default()).unwrap();
    assert!(!html.contains("<script>alert"));
    assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    assert!(html.contains("href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\""));
}

#[test]
fn test_script_links_never_reach_html() {
    let tree = VisualTree {
        nodes: vec![VNode::element("a").with_attr("href", "javascript:alert(1)")],
        ..Default::default()
    };

    let html = compile_to_html(&tree, CompileOptions::default()).unwrap();
    assert!(html.contains("href=\"#\""));
    assert!(!html.contains("javascript:"));
}

#[test]
fn test_event_handler_attributes_are_rejected() {
    let tree = VisualTree {
        nodes: vec![VNode::element("div").with_attr("onclick", "x()")],
        ..Default::default()
    };

    match compile_to_html(&tree, CompileOptions::default()) {
        Err(CompileError::InvalidAttribute { tag, name }) => {
            assert_eq!(tag, "div");
            assert_eq!(name, "onclick");
        }
        other => panic!("Expected invalid attribute, got {:?}", other),
    }
}

#[test]
fn test_invalid_tag_is_rejected() {
    let tree = VisualTree {
        nodes: vec![VNode::element("div><script")],
        ..Default::default()
    };
    assert!(matches!(
        compile_to_html(&tree, CompileOptions::default()),
        Err(CompileError::InvalidTag(_))
    ));
}

#[test]
fn test_compact_output() {
    let site = site(&[BlockType::Spacer]);
    let options = CompileOptions {
        pretty: false,
        ..Default::default()
    };

    let html = compile_to_html(&publish(&site), options).unwrap();
    assert!(!html.contains('\n'));
    assert!(html.contains("<div class=\"spacer\" style=\"height: 50px;\"></div>"));
}

#[test]
fn test_checkout_actions_drop_href() {
    let mut site = Site::new(SiteId::new("s"), "Ana", PlanTier::Pro);
    site.blocks.push(Block::new(
        BlockId::new("buy"),
        BlockContent::Button(ButtonContent {
            label: "Buy".to_string(),
            url: "https://pay.example.com".to_string(),
            checkout_enabled: true,
            ..Default::default()
        }),
        Default::default(),
    ));

    let html = compile_to_html(&publish(&site), CompileOptions::default()).unwrap();
    assert!(html.contains("data-action=\"{&quot;kind&quot;:&quot;openCheckout&quot;"));
    assert!(!html.contains("href=\"https://pay.example.com\""));
}
