//! # Tracking
//!
//! Two collaborators, both silent in preview:
//!
//! - [`inject_pixels`] loads at most one script per configured pixel provider,
//!   keyed `pixel-{provider}` so re-renders never inject twice, and initializes
//!   the provider with its id (`pixel-{provider}-init`).
//! - [`ClickTracker`] forwards link clicks to an [`AnalyticsSink`].

use crate::renderer::RenderMode;
use crate::vdom::PixelSpec;
use minisite_document::{PixelProvider, TrackingConfig};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Script tag key for a provider
pub fn script_key(provider: PixelProvider) -> String {
    format!("pixel-{}", provider.as_str())
}

/// Loader script for a provider's pixel
pub fn script_url(provider: PixelProvider, id: &str) -> String {
    match provider {
        PixelProvider::Meta => "https://connect.facebook.net/en_US/fbevents.js".to_string(),
        PixelProvider::GoogleAnalytics | PixelProvider::GoogleAds => {
            format!("https://www.googletagmanager.com/gtag/js?id={}", id)
        }
        PixelProvider::Tiktok => format!(
            "https://analytics.tiktok.com/i18n/pixel/events.js?sdkid={}",
            id
        ),
        PixelProvider::Pinterest => "https://s.pinimg.com/ct/core.js".to_string(),
        PixelProvider::Taboola => format!("https://cdn.taboola.com/libtrc/unip/{}/tfa.js", id),
    }
}

/// Key of the inline script that initializes a provider
pub fn init_key(provider: PixelProvider) -> String {
    format!("{}-init", script_key(provider))
}

/// Inline script that sets up the provider's command queue and initializes it with `id`
///
/// The id is embedded as a JSON string literal, so it cannot break out of the call.
pub fn init_snippet(provider: PixelProvider, id: &str) -> String {
    let id = Value::from(id).to_string();
    match provider {
        PixelProvider::Meta => format!(
            "!function(f){{if(f.fbq)return;var n=f.fbq=function(){{n.callMethod?\
             n.callMethod.apply(n,arguments):n.queue.push(arguments)}};if(!f._fbq)f._fbq=n;\
             n.push=n;n.loaded=!0;n.version='2.0';n.queue=[]}}(window);\
             fbq('init',{id});fbq('track','PageView');"
        ),
        PixelProvider::GoogleAnalytics => format!(
            "window.dataLayer=window.dataLayer||[];\
             window.gtag=window.gtag||function(){{dataLayer.push(arguments)}};\
             gtag('js',new Date());gtag('config',{id});"
        ),
        PixelProvider::GoogleAds => format!(
            "window.dataLayer=window.dataLayer||[];\
             window.gtag=window.gtag||function(){{dataLayer.push(arguments)}};\
             gtag('config',{id});"
        ),
        PixelProvider::Tiktok => format!(
            "!function(w){{var t=w.ttq=w.ttq||[];\
             ['page','track','identify','load'].forEach(function(m){{\
             t[m]=t[m]||function(){{t.push([m].concat([].slice.call(arguments)))}}}})}}(window);\
             ttq.load({id});ttq.page();"
        ),
        PixelProvider::Pinterest => format!(
            "!function(w){{if(w.pintrk)return;var p=w.pintrk=function(){{\
             p.queue.push([].slice.call(arguments))}};p.queue=[];p.version='3.0'}}(window);\
             pintrk('load',{id});pintrk('page');"
        ),
        PixelProvider::Taboola => format!(
            "window._tfa=window._tfa||[];\
             _tfa.push({{notify:'event',name:'page_view',id:{id}}});"
        ),
    }
}

/// Configured pixels in provider order
pub fn pixel_specs(config: Option<&TrackingConfig>) -> Vec<PixelSpec> {
    config
        .map(|config| {
            config
                .configured()
                .into_iter()
                .map(|(provider, id)| PixelSpec {
                    provider,
                    id: id.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Somewhere scripts can be added by key
pub trait PixelInjector {
    fn has_script(&self, key: &str) -> bool;
    /// External script loaded from `src`
    fn inject_script(&mut self, key: &str, src: &str);
    /// Inline script body
    fn inject_inline(&mut self, key: &str, code: &str);
}

/// In-memory script registry, keyed like the page's script tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptRegistry {
    scripts: BTreeMap<String, String>,
    inline: BTreeMap<String, String>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `src` of an external script
    pub fn get(&self, key: &str) -> Option<&str> {
        self.scripts.get(key).map(String::as_str)
    }

    pub fn inline(&self, key: &str) -> Option<&str> {
        self.inline.get(key).map(String::as_str)
    }

    /// External scripts only
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty() && self.inline.is_empty()
    }
}

impl PixelInjector for ScriptRegistry {
    fn has_script(&self, key: &str) -> bool {
        self.scripts.contains_key(key)
    }

    fn inject_script(&mut self, key: &str, src: &str) {
        self.scripts.insert(key.to_string(), src.to_string());
    }

    fn inject_inline(&mut self, key: &str, code: &str) {
        self.inline.insert(key.to_string(), code.to_string());
    }
}

/// Inject every configured pixel not already present. Returns how many were added.
pub fn inject_pixels<I: PixelInjector>(
    config: Option<&TrackingConfig>,
    mode: &RenderMode,
    injector: &mut I,
) -> usize {
    if mode.is_preview() {
        return 0;
    }

    let mut injected = 0;
    for spec in pixel_specs(config) {
        let key = script_key(spec.provider);
        if injector.has_script(&key) {
            continue;
        }
        injector.inject_inline(&init_key(spec.provider), &init_snippet(spec.provider, &spec.id));
        injector.inject_script(&key, &script_url(spec.provider, &spec.id));
        debug!(provider = %spec.provider, "injected tracking pixel");
        injected += 1;
    }
    injected
}

/// Receives analytics events
pub trait AnalyticsSink {
    fn track(&mut self, event: &str, properties: Value);
}

/// Collects events in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSink {
    pub events: Vec<(String, Value)>,
}

impl AnalyticsSink for RecordingSink {
    fn track(&mut self, event: &str, properties: Value) {
        self.events.push((event.to_string(), properties));
    }
}

/// Reports link clicks on a published page
pub struct ClickTracker<S: AnalyticsSink> {
    sink: S,
    enabled: bool,
}

impl<S: AnalyticsSink> ClickTracker<S> {
    pub fn new(sink: S, mode: &RenderMode) -> Self {
        Self {
            sink,
            enabled: !mode.is_preview(),
        }
    }

    /// Returns whether an event was sent
    pub fn track_click(&mut self, label: &str, url: Option<&str>) -> bool {
        if !self.enabled {
            return false;
        }
        self.sink.track("click", json!({ "label": label, "url": url }));
        true
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
