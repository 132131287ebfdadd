use crate::seo::SeoTags;
use crate::widgets::Widget;
use minisite_document::{BlockId, PixelProvider};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What the host should do when the user activates a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    /// Report a click to analytics, then follow the link
    TrackClick {
        block_id: BlockId,
        label: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    /// Open the lead-capture form for a product
    OpenCheckout {
        block_id: BlockId,
        product_name: String,
        price: String,
        url: String,
    },
    /// Editor: select the block
    SelectBlock { block_id: BlockId },
    /// Open/close one FAQ entry
    ToggleFaq { block_id: BlockId, index: usize },
    /// Trigger the deferred install prompt
    InstallApp,
}

/// Visual tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<VNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        action: Option<Action>,
        /// Block this node was rendered from
        #[serde(skip_serializing_if = "Option::is_none")]
        block_id: Option<BlockId>,
    },

    Text { content: String },

    /// Empty or invalid state shown in place of a block's body
    Placeholder {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        block_id: Option<BlockId>,
    },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
            action: None,
            block_id: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn placeholder(message: impl Into<String>, block_id: &BlockId) -> Self {
        VNode::Placeholder {
            message: message.into(),
            block_id: Some(block_id.clone()),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    /// Set the attribute only when `value` is present
    pub fn with_opt_attr(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.with_attr(key, value),
            None => self,
        }
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_opt_style(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.with_style(key, value),
            None => self,
        }
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_opt_child(self, child: Option<VNode>) -> Self {
        match child {
            Some(child) => self.with_child(child),
            None => self,
        }
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn with_action(mut self, new_action: Action) -> Self {
        if let VNode::Element { ref mut action, .. } = self {
            *action = Some(new_action);
        }
        self
    }

    pub fn with_opt_action(self, action: Option<Action>) -> Self {
        match action {
            Some(action) => self.with_action(action),
            None => self,
        }
    }

    pub fn with_block_id(mut self, id: &BlockId) -> Self {
        if let VNode::Element {
            ref mut block_id, ..
        } = self
        {
            *block_id = Some(id.clone());
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn style(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { styles, .. } => styles.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn action(&self) -> Option<&Action> {
        match self {
            VNode::Element { action, .. } => action.as_ref(),
            _ => None,
        }
    }

    /// Depth-first walk over this node and all descendants
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a VNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

/// A tracking pixel the host should load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSpec {
    pub provider: PixelProvider,
    pub id: String,
}

/// Render output: nodes plus everything the host wires up around them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualTree {
    pub nodes: Vec<VNode>,
    /// Live behavior (countdowns, autoplaying carousels)
    pub widgets: Vec<Widget>,
    /// Publish only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<SeoTags>,
    /// Publish only
    pub pixels: Vec<PixelSpec>,
}

impl VisualTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: VNode) {
        self.nodes.push(node);
    }

    /// Every action reachable in the tree, in document order
    pub fn actions(&self) -> Vec<&Action> {
        let mut actions = Vec::new();
        for node in &self.nodes {
            node.walk(&mut |n| {
                if let Some(action) = n.action() {
                    actions.push(action);
                }
            });
        }
        actions
    }

    /// Every placeholder message in the tree
    pub fn placeholders(&self) -> Vec<&str> {
        let mut messages = Vec::new();
        for node in &self.nodes {
            node.walk(&mut |n| {
                if let VNode::Placeholder { message, .. } = n {
                    messages.push(message.as_str());
                }
            });
        }
        messages
    }

    /// First element rendered for `block_id` (its wrapper)
    pub fn find_block(&self, block_id: &BlockId) -> Option<&VNode> {
        let mut found = None;
        for node in &self.nodes {
            node.walk(&mut |n| {
                if found.is_none() {
                    if let VNode::Element {
                        block_id: Some(id), ..
                    } = n
                    {
                        if id == block_id {
                            found = Some(n);
                        }
                    }
                }
            });
        }
        found
    }
}
