//! Loading stored site documents

use minisite_document::{
    BackgroundMode, BlockContent, BlockType, DocumentError, PlanTier, Site,
};

const LEGACY_SITE: &str = r##"{
    "id": "site-1",
    "userId": "user-1",
    "slug": "ana",
    "name": "Ana",
    "plan": "free",
    "sections": [
        {
            "id": "h1",
            "type": "hero",
            "content": { "title": "Ana Souza", "subtitle": "Consultora", "imageSrc": "https://img/ana.png" },
            "style": { "textAlign": "center", "backgroundType": "color", "overlayOpacity": 0.4 }
        },
        {
            "id": "t1",
            "type": "text",
            "content": { "title": "Sobre", "subtitle": "Texto de apresentação" },
            "style": { "textAlign": "left" }
        },
        {
            "id": "w1",
            "type": "whatsapp",
            "content": { "label": "Chamar", "whatsappNumber": "55 11 99999-9999" },
            "style": { "backgroundColor": "#25D366" },
            "clicks": 7
        },
        { "id": "sp", "type": "spacer", "content": {}, "style": { "height": "50px" } }
    ],
    "theme": {
        "id": "dark", "name": "Dark", "backgroundColor": "#0a0a0a", "primaryColor": "#d4af37",
        "secondaryColor": "#1a1a1a", "textColor": "#fff", "fontFamily": "Inter",
        "backgroundType": "image", "backgroundImage": "https://img/bg.png"
    },
    "isPublished": true,
    "views": 42,
    "seo": { "title": "", "description": "", "image": "" }
}"##;

#[test]
fn test_load_legacy_document() {
    let site = Site::from_json(LEGACY_SITE).expect("legacy document should load");

    assert_eq!(site.plan, PlanTier::Free);
    assert_eq!(site.blocks.len(), 4);
    assert_eq!(site.theme.background, BackgroundMode::Image);

    let types: Vec<BlockType> = site.blocks.iter().map(|b| b.block_type()).collect();
    assert_eq!(
        types,
        vec![BlockType::Header, BlockType::Text, BlockType::MessagingButton, BlockType::Spacer]
    );

    match &site.blocks[1].content {
        BlockContent::Text(text) => assert_eq!(text.body, "Texto de apresentação"),
        other => panic!("Expected text content, got {:?}", other),
    }

    match &site.blocks[2].content {
        BlockContent::MessagingButton(msg) => assert_eq!(msg.number, "55 11 99999-9999"),
        other => panic!("Expected messaging content, got {:?}", other),
    }
    assert_eq!(site.blocks[2].clicks, Some(7));
}

#[test]
fn test_saved_document_uses_current_names() {
    let site = Site::from_json(LEGACY_SITE).unwrap();
    let json = site.to_json_pretty().unwrap();

    assert!(json.contains("\"blocks\""));
    assert!(json.contains("\"type\": \"header\""));
    assert!(json.contains("\"type\": \"messaging-button\""));
    assert!(!json.contains("\"sections\""));

    let reloaded = Site::from_json(&json).unwrap();
    assert_eq!(reloaded, site);
}

#[test]
fn test_duplicate_block_ids_are_rejected() {
    let source = r#"{
        "id": "s",
        "blocks": [
            { "id": "a", "type": "divider", "content": {} },
            { "id": "a", "type": "spacer", "content": {} }
        ]
    }"#;

    match Site::from_json(source) {
        Err(DocumentError::DuplicateBlockId(id)) => assert_eq!(id, "a"),
        other => panic!("Expected duplicate id error, got {:?}", other),
    }
}

#[test]
fn test_unknown_block_type_is_a_json_error() {
    let source = r#"{ "id": "s", "blocks": [ { "id": "a", "type": "marquee", "content": {} } ] }"#;
    assert!(matches!(Site::from_json(source), Err(DocumentError::Json(_))));
}
