use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use minisite_document::{BlockType, PlanTier, Site, SiteId, Theme};
use minisite_editor::default_block;
use minisite_renderer::{resolve_embed, RenderMode, Renderer};

fn full_site(copies: usize) -> Site {
    let theme = Theme::dark();
    let now = Utc::now();
    let mut site = Site::new(SiteId::new("bench"), "Bench", PlanTier::AdminMaster);
    for _ in 0..copies {
        for kind in BlockType::ALL {
            site.blocks.push(default_block(kind, &theme, now));
        }
    }
    site
}

fn render_catalog(c: &mut Criterion) {
    let site = full_site(1);
    let renderer = Renderer::new(RenderMode::Publish);

    c.bench_function("render_catalog_publish", |b| {
        b.iter(|| renderer.render(black_box(&site), &site.theme))
    });
}

fn render_large_page(c: &mut Criterion) {
    let site = full_site(10);
    let renderer = Renderer::new(RenderMode::preview());

    c.bench_function("render_170_blocks_preview", |b| {
        b.iter(|| renderer.render(black_box(&site), &site.theme))
    });
}

fn resolve_embeds(c: &mut Criterion) {
    let urls = [
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
        "https://vimeo.com/76979871",
        "javascript:alert(1)",
        "https://example.com/video.mp4",
    ];

    c.bench_function("resolve_embed", |b| {
        b.iter(|| {
            for url in urls {
                black_box(resolve_embed(black_box(url)));
            }
        })
    });
}

criterion_group!(benches, render_catalog, render_large_page, resolve_embeds);
criterion_main!(benches);
