// Copyright 2025 the Boxwood Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine context object.

use boxwood_box_tree::{Bounds, BoxNode, BoxTree, Damage, NodeId};
use boxwood_interaction::{BoxEvent, Emitted, Interactions, StateId};
use boxwood_pointer::{PointerPipeline, PointerSample, RawPointerKind};
use boxwood_render::{DisplayList, DisplaySurface, StyleSheet, Viewport};
use tracing::{debug, info, trace, warn};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::painter::{PaintJob, Painter};

/// Handle returned by [`Engine::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(NodeId, BoxEvent) + Send>;

struct Subscription {
    id: SubscriptionId,
    node: NodeId,
    event: BoxEvent,
    callback: Callback,
}

/// Owns the box tree, the pointer pipeline, every interaction machine, the style sheet, and
/// the painter.
///
/// All input goes through [`dispatch_pointer_sample`](Self::dispatch_pointer_sample). Each
/// sample is routed, delivered to the interaction states one event at a time, and the damage
/// it caused is repainted as a single rectangle before the call returns (or, in
/// [`PaintMode::Background`](crate::PaintMode::Background), queued for the paint worker).
///
/// ## Example
///
/// ```rust
/// use boxwood::{Engine, EngineConfig, RecordingSurface};
/// use boxwood::interaction::{BoxEvent, StateId};
/// use boxwood::pointer::RawPointerKind;
/// use std::sync::{Arc, Mutex};
///
/// let surface = RecordingSurface::new();
/// let mut engine = Engine::new(EngineConfig::default(), surface.clone()).unwrap();
/// let card = engine.create_node(10, 10, 100, 50, 0.0, "card");
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = seen.clone();
/// engine.subscribe(card, BoxEvent::In, move |_, ev| sink.lock().unwrap().push(ev));
///
/// engine.dispatch_pointer_sample(RawPointerKind::Move, 15, 15);
/// assert_eq!(*seen.lock().unwrap(), [BoxEvent::In]);
/// assert_eq!(engine.state_of(card), Some(StateId::Hover));
/// assert!(!surface.is_empty());
/// ```
pub struct Engine<S: DisplaySurface + Send + 'static> {
    config: EngineConfig,
    tree: BoxTree,
    pipeline: PointerPipeline,
    interactions: Interactions,
    styles: StyleSheet,
    damage: Damage,
    subscriptions: Vec<Subscription>,
    next_subscription: u64,
    painter: Painter<S>,
    stopped: bool,
}

impl<S: DisplaySurface + Send + 'static> core::fmt::Debug for Engine<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("tree", &self.tree)
            .field("subscriptions", &self.subscriptions.len())
            .finish_non_exhaustive()
    }
}

impl<S: DisplaySurface + Send + 'static> Engine<S> {
    /// Build an engine presenting to `surface`.
    pub fn new(config: EngineConfig, surface: S) -> EngineResult<Self> {
        config.validate()?;
        let painter = Painter::new(config.paint_mode, surface)?;
        info!(
            width = config.viewport_width,
            height = config.viewport_height,
            zoom = config.zoom,
            mode = ?config.paint_mode,
            "engine started"
        );
        Ok(Self {
            tree: BoxTree::new(config.viewport_width, config.viewport_height),
            pipeline: PointerPipeline::new(),
            interactions: Interactions::new(config.hover_style.clone()),
            styles: StyleSheet::new(),
            damage: Damage::default(),
            subscriptions: Vec::new(),
            next_subscription: 0,
            painter,
            stopped: false,
            config,
        })
    }

    /// Configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The box tree.
    pub fn tree(&self) -> &BoxTree {
        &self.tree
    }

    /// The box tree, mutably. Changes made here are not repainted until asked for.
    pub fn tree_mut(&mut self) -> &mut BoxTree {
        &mut self.tree
    }

    /// The style sheet.
    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// The style sheet, mutably.
    pub fn styles_mut(&mut self) -> &mut StyleSheet {
        &mut self.styles
    }

    /// The pointer pipeline.
    pub fn pipeline(&self) -> &PointerPipeline {
        &self.pipeline
    }

    /// The interaction machines.
    pub fn interactions(&self) -> &Interactions {
        &self.interactions
    }

    /// Current interaction state of `node`.
    pub fn state_of(&self, node: NodeId) -> Option<StateId> {
        self.interactions.state_of(node)
    }

    /// Add an interactive box under the content root and paint it.
    ///
    /// The box gets a machine with the default Normal/Hover/Move table.
    pub fn create_node(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        angle: f64,
        style_class: &str,
    ) -> NodeId {
        let node = BoxNode::new(x, y, width, height, style_class).with_angle(angle);
        let root = self.tree.content_root();
        let id = self.tree.add_node(node, Some(root));
        self.interactions.attach(id, &mut self.tree, &mut self.damage);
        self.damage.push(self.tree.bounds(id));
        info!(node = ?id, x, y, width, height, angle, style = style_class, "node created");
        self.flush_damage();
        id
    }

    /// Disable a box and its subtree, and repaint the area it covered.
    pub fn disable_node(&mut self, node: NodeId) {
        self.tree.disable_subtree(node);
        self.damage.push(self.tree.bounds(node));
        self.flush_damage();
    }

    /// Re-enable a box and its subtree, and repaint it.
    pub fn enable_node(&mut self, node: NodeId) {
        self.tree.enable_subtree(node);
        self.damage.push(self.tree.bounds(node));
        self.flush_damage();
    }

    /// Feed one raw pointer sample.
    ///
    /// Samples outside the viewport, and samples that reach no listener, are ignored.
    pub fn dispatch_pointer_sample(&mut self, kind: RawPointerKind, x: i32, y: i32) {
        let plan = self
            .pipeline
            .route(PointerSample::new(kind, x, y), &self.tree);
        for event in &plan {
            let emitted = self
                .interactions
                .deliver(event, &mut self.tree, &mut self.damage);
            for e in emitted {
                self.notify(e);
            }
        }
        self.flush_damage();
    }

    /// Feed one raw pointer sample by host event name (`mousedown`, `move`, `dblclick`, …).
    ///
    /// Unknown names are logged and ignored.
    pub fn dispatch_raw_event(&mut self, name: &str, x: i32, y: i32) {
        match name.parse::<RawPointerKind>() {
            Ok(kind) => self.dispatch_pointer_sample(kind, x, y),
            Err(err) => warn!(%err, x, y, "ignoring raw pointer event"),
        }
    }

    /// Send an abstract event straight to `node`'s machine, as if one of its states emitted it.
    pub fn emit(&mut self, node: NodeId, event: BoxEvent) {
        let transition = self
            .interactions
            .transition(node, event, &mut self.tree, &mut self.damage);
        self.notify(Emitted {
            node,
            event,
            transition,
        });
        self.flush_damage();
    }

    /// Call `callback` whenever `node` emits `event`.
    pub fn subscribe(
        &mut self,
        node: NodeId,
        event: BoxEvent,
        callback: impl FnMut(NodeId, BoxEvent) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.push(Subscription {
            id,
            node,
            event,
            callback: Box::new(callback),
        });
        debug!(?node, %event, ?id, "subscribed");
        id
    }

    /// Drop a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    fn notify(&mut self, emitted: Emitted) {
        trace!(node = ?emitted.node, event = %emitted.event, "box event");
        for sub in &mut self.subscriptions {
            if sub.node == emitted.node && sub.event == emitted.event {
                (sub.callback)(emitted.node, emitted.event);
            }
        }
    }

    /// Repaint an absolute rectangle, clipped to the viewport.
    pub fn paint_rect(&mut self, rect: Bounds) {
        let (width, height) = self.tree.size();
        let region = rect.intersect(Bounds::new(0, 0, width, height));
        if region.is_empty() {
            trace!(?rect, "paint skipped; nothing visible");
            return;
        }
        let list = DisplayList::capture(&self.tree, &self.styles, region);
        let viewport = Viewport::from_dirty(region, self.config.zoom);
        self.painter.submit(PaintJob { list, viewport });
    }

    /// Repaint the area covered by `node`.
    pub fn paint_node(&mut self, node: NodeId) {
        self.paint_rect(self.tree.bounds(node));
    }

    /// Repaint the whole viewport.
    pub fn repaint_all(&mut self) {
        let (width, height) = self.tree.size();
        self.paint_rect(Bounds::new(0, 0, width, height));
    }

    /// Resize the viewport and repaint it.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.tree.resize(width, height);
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self.repaint_all();
    }

    /// Block until every queued paint has been presented.
    pub fn flush(&self) {
        self.painter.flush();
    }

    /// Let the background paint worker drain its queue, then join it. Background paints
    /// requested afterwards are dropped.
    ///
    /// Called automatically on drop.
    pub fn shutdown(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.painter.shutdown();
        info!("engine stopped");
    }

    fn flush_damage(&mut self) {
        let damage = self.damage.take();
        if let Some(rect) = damage.union_rect() {
            self.paint_rect(rect);
        }
    }
}

impl<S: DisplaySurface + Send + 'static> Drop for Engine<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
