//! Domain events multiplexed onto engine hooks.
//!
//! Consumers subscribe to a small closed set of [`EventKind`]s. Each kind is
//! realized by exactly one low-level `setCursor` hook, installed into the
//! [`OptsBuilder`] when the kind gets its first subscriber and never again
//! for the lifetime of the builder. When the engine fires that hook, the
//! multiplexer re-expresses the engine cursor as a [`ChartEvent`] and calls
//! every subscriber of the kind synchronously, in subscription order.
//!
//! ```text
//! on(Move, a) ─┐                       ┌─► a(evt)
//! on(Move, b) ─┼─► 1× setCursor hook ──┼─► b(evt)
//! on(Move, c) ─┘                       └─► c(evt)
//! ```
//!
//! An [`EventMux`] must be used with one builder for its whole life; the
//! installed-flags describe that builder only.

use crate::opts::{Cursor, HookArgs, HookKind, OptsBuilder};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Subscriber callback.
pub type Handler = Rc<dyn Fn(&ChartEvent)>;

/// Domain event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// The set of nearest points changed.
    Hover,
    /// The cursor moved.
    Move,
    /// The cursor left the plot area.
    Leave,
}

impl EventKind {
    pub fn all() -> &'static [EventKind] {
        &[EventKind::Hover, EventKind::Move, EventKind::Leave]
    }

    /// Engine hook that realizes this kind
    pub fn hook(&self) -> HookKind {
        match self {
            EventKind::Hover | EventKind::Move | EventKind::Leave => HookKind::SetCursor,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Hover => write!(f, "hover"),
            EventKind::Move => write!(f, "move"),
            EventKind::Leave => write!(f, "leave"),
        }
    }
}

/// Event delivered to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartEvent {
    /// Cursor x in plot space
    pub x: f64,
    /// Cursor y in plot space
    pub y: f64,
    /// Nearest data index per series, `None` where no point is near
    pub data_idxs: Vec<Option<usize>>,
}

impl ChartEvent {
    pub fn from_cursor(cursor: &Cursor) -> Self {
        Self {
            x: cursor.left,
            y: cursor.top,
            data_idxs: cursor.idxs.clone(),
        }
    }

    /// Whether the event lies over the plot area
    pub fn is_inside(&self) -> bool {
        self.x >= 0.0 && self.y >= 0.0
    }
}

/// Identifier of one subscription within a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct SubscriberList {
    next_id: u64,
    entries: Vec<(SubscriptionId, Handler)>,
}

impl SubscriberList {
    fn push(&mut self, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, handler));
        id
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }
}

type SharedList = Rc<RefCell<SubscriberList>>;

/// Invoke every subscriber in order.
///
/// Handlers are cloned out first so a handler may subscribe or unsubscribe
/// while the fan-out is running; such changes take effect on the next event.
fn fan_out(kind: EventKind, list: &SharedList, event: &ChartEvent) {
    let handlers: Vec<Handler> = list.borrow().entries.iter().map(|(_, h)| h.clone()).collect();
    tracing::trace!("Dispatching {} event to {} subscribers", kind, handlers.len());
    for handler in handlers {
        handler(event);
    }
}

/// Disposer returned by [`EventMux::on`].
///
/// Dropping it keeps the subscription alive; call [`Subscription::unsubscribe`]
/// to remove the handler.
#[derive(Debug)]
pub struct Subscription {
    kind: EventKind,
    id: SubscriptionId,
    list: Weak<RefCell<SubscriberList>>,
}

impl Subscription {
    /// Remove the handler. Returns `false` if it was already gone or the
    /// owning multiplexer has been dropped.
    pub fn unsubscribe(self) -> bool {
        let removed = match self.list.upgrade() {
            Some(list) => list.borrow_mut().remove(self.id),
            None => false,
        };
        tracing::trace!("Unsubscribed {} handler (removed: {})", self.kind, removed);
        removed
    }
}

struct Channel {
    subscribers: SharedList,
    installed: bool,
}

/// Maps event subscriptions onto at most one engine hook per kind.
pub struct EventMux {
    channels: BTreeMap<EventKind, Channel>,
}

impl EventMux {
    pub fn new() -> Self {
        let channels = EventKind::all()
            .iter()
            .map(|&kind| {
                (
                    kind,
                    Channel {
                        subscribers: Rc::new(RefCell::new(SubscriberList::default())),
                        installed: false,
                    },
                )
            })
            .collect();
        Self { channels }
    }

    /// Subscribe `handler` to `kind`, installing the kind's hook into
    /// `builder` on first use.
    pub fn on(
        &mut self,
        builder: &mut OptsBuilder,
        kind: EventKind,
        handler: impl Fn(&ChartEvent) + 'static,
    ) -> Subscription {
        let channel = self.channel_mut(kind);

        if !channel.installed {
            install_hook(builder, kind, channel.subscribers.clone());
            channel.installed = true;
            tracing::debug!("Installed {} hook for {} events", kind.hook(), kind);
        }

        let id = channel.subscribers.borrow_mut().push(Rc::new(handler));
        Subscription {
            kind,
            id,
            list: Rc::downgrade(&channel.subscribers),
        }
    }

    /// Number of live subscribers for `kind`
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.channels
            .get(&kind)
            .map_or(0, |c| c.subscribers.borrow().entries.len())
    }

    /// Whether the hook for `kind` has been installed
    pub fn is_installed(&self, kind: EventKind) -> bool {
        self.channels.get(&kind).is_some_and(|c| c.installed)
    }

    fn channel_mut(&mut self, kind: EventKind) -> &mut Channel {
        self.channels.entry(kind).or_insert_with(|| Channel {
            subscribers: Rc::new(RefCell::new(SubscriberList::default())),
            installed: false,
        })
    }
}

impl Default for EventMux {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventMux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (kind, channel) in &self.channels {
            map.entry(
                kind,
                &(channel.installed, channel.subscribers.borrow().entries.len()),
            );
        }
        map.finish()
    }
}

fn install_hook(builder: &mut OptsBuilder, kind: EventKind, list: SharedList) {
    match kind {
        EventKind::Move => {
            builder.add_hook(HookKind::SetCursor, move |args: &HookArgs| {
                fan_out(kind, &list, &ChartEvent::from_cursor(&args.cursor));
            });
        }
        EventKind::Hover => {
            let last: RefCell<Option<Vec<Option<usize>>>> = RefCell::new(None);
            builder.add_hook(HookKind::SetCursor, move |args: &HookArgs| {
                let idxs = &args.cursor.idxs;
                let changed = match &*last.borrow() {
                    Some(prev) => prev != idxs,
                    None => idxs.iter().any(Option::is_some),
                };
                if changed {
                    *last.borrow_mut() = Some(idxs.clone());
                    fan_out(kind, &list, &ChartEvent::from_cursor(&args.cursor));
                }
            });
        }
        EventKind::Leave => {
            let was_inside = Cell::new(false);
            builder.add_hook(HookKind::SetCursor, move |args: &HookArgs| {
                let inside = args.cursor.is_inside();
                if was_inside.replace(inside) && !inside {
                    fan_out(kind, &list, &ChartEvent::from_cursor(&args.cursor));
                }
            });
        }
    }
}
