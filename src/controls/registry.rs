//! Callback Registries
//!
//! Bidirectional mapping from monotonically allocated integer tags to
//! script-supplied callbacks. A tag is issued when an item is created and
//! comes back later, out of band, in a selection notification; the registry
//! routes that notification to the callback stored at creation time.
//!
//! Tags are never reused and entries are never removed, matching the native
//! host's own non-removal of bar items.

use std::collections::BTreeMap;

/// Integer identifier assigned at creation time to a bar item, used to
/// correlate an incoming native notification with its script-side handler.
pub type Tag = u32;

/// Tag-keyed callback storage for tab bars.
#[derive(Debug, Default)]
pub struct TagRegistry<C> {
    next_tag: Tag,
    callbacks: BTreeMap<Tag, C>,
}

impl<C> TagRegistry<C> {
    pub fn new() -> Self {
        TagRegistry {
            next_tag: 0,
            callbacks: BTreeMap::new(),
        }
    }

    /// Issue the next tag. Tags start at 0 and are never reused.
    pub fn allocate_tag(&mut self) -> Tag {
        let tag = self.next_tag;
        self.next_tag += 1;
        tag
    }

    /// Store `callback` under `tag`, overwriting any previous entry.
    pub fn register(&mut self, tag: Tag, callback: C) {
        self.callbacks.insert(tag, callback);
    }

    pub fn callback(&self, tag: Tag) -> Option<&C> {
        self.callbacks.get(&tag)
    }

    pub fn callback_mut(&mut self, tag: Tag) -> Option<&mut C> {
        self.callbacks.get_mut(&tag)
    }

    /// Run `invoke` on the callback registered for `tag`, if any.
    ///
    /// A notification for an unknown or never-registered tag is a silent
    /// no-op: system-provided items have no script-side handler.
    pub fn dispatch_with<R>(&mut self, tag: Tag, invoke: impl FnOnce(&mut C) -> R) -> Option<R> {
        self.callbacks.get_mut(&tag).map(invoke)
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

/// A tool-bar item entry: the caller-supplied name plus an optional
/// selection callback.
#[derive(Debug)]
pub struct ItemRecord<C> {
    pub name: String,
    pub on_select: Option<C>,
}

/// Tag-keyed item storage for tool bars.
///
/// Records are keyed by an explicit tag map rather than by position in a
/// sequence, so the monotonic-tag contract survives any future removal
/// support. With no removal, the tag of the n-th created record is n-1.
#[derive(Debug, Default)]
pub struct ItemRegistry<C> {
    next_tag: Tag,
    items: BTreeMap<Tag, ItemRecord<C>>,
}

impl<C> ItemRegistry<C> {
    pub fn new() -> Self {
        ItemRegistry {
            next_tag: 0,
            items: BTreeMap::new(),
        }
    }

    /// Create a record for `name` and return its freshly issued tag.
    pub fn create(&mut self, name: impl Into<String>, on_select: Option<C>) -> Tag {
        let tag = self.next_tag;
        self.next_tag += 1;
        self.items.insert(
            tag,
            ItemRecord {
                name: name.into(),
                on_select,
            },
        );
        tag
    }

    /// Replace the stored callback on the earliest-created record whose name
    /// matches. Returns false if no record matches; names are not required
    /// to be unique, and duplicates resolve to the first match in tag order.
    pub fn update(&mut self, name: &str, on_select: C) -> bool {
        for record in self.items.values_mut() {
            if record.name == name {
                record.on_select = Some(on_select);
                return true;
            }
        }
        false
    }

    pub fn record(&self, tag: Tag) -> Option<&ItemRecord<C>> {
        self.items.get(&tag)
    }

    /// Run `invoke` on the callback of the record at `tag`, if the record
    /// exists and has one. Unknown tags are tolerated as silent no-ops.
    pub fn dispatch_with<R>(&mut self, tag: Tag, invoke: impl FnOnce(&mut C) -> R) -> Option<R> {
        self.items
            .get_mut(&tag)
            .and_then(|record| record.on_select.as_mut())
            .map(invoke)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, Box<dyn FnMut()>) {
        let hits = Rc::new(Cell::new(0));
        let inner = hits.clone();
        (hits, Box::new(move || inner.set(inner.get() + 1)))
    }

    #[test]
    fn tags_are_monotonic_from_zero() {
        let mut registry: TagRegistry<Box<dyn FnMut()>> = TagRegistry::new();
        for expected in 0..5 {
            assert_eq!(registry.allocate_tag(), expected);
        }
    }

    #[test]
    fn register_then_dispatch_invokes_once() {
        let mut registry: TagRegistry<Box<dyn FnMut()>> = TagRegistry::new();
        let (hits, cb) = counter();

        let tag = registry.allocate_tag();
        registry.register(tag, cb);

        assert!(registry.dispatch_with(tag, |f| f()).is_some());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn dispatch_on_unknown_tag_is_a_noop() {
        let mut registry: TagRegistry<Box<dyn FnMut()>> = TagRegistry::new();
        assert!(registry.dispatch_with(7, |f| f()).is_none());
    }

    #[test]
    fn register_overwrites_previous_entry() {
        let mut registry: TagRegistry<Box<dyn FnMut()>> = TagRegistry::new();
        let (old_hits, old_cb) = counter();
        let (new_hits, new_cb) = counter();

        let tag = registry.allocate_tag();
        registry.register(tag, old_cb);
        registry.register(tag, new_cb);

        registry.dispatch_with(tag, |f| f());
        assert_eq!(old_hits.get(), 0);
        assert_eq!(new_hits.get(), 1);
    }

    #[test]
    fn created_records_are_retrievable_by_tag() {
        let mut registry: ItemRegistry<Box<dyn FnMut()>> = ItemRegistry::new();
        assert_eq!(registry.create("search", None), 0);
        assert_eq!(registry.create("add", None), 1);
        assert_eq!(registry.create("done", None), 2);

        assert_eq!(registry.record(0).unwrap().name, "search");
        assert_eq!(registry.record(1).unwrap().name, "add");
        assert_eq!(registry.record(2).unwrap().name, "done");
        assert!(registry.record(3).is_none());
    }

    #[test]
    fn update_replaces_callback_on_earliest_match() {
        let mut registry: ItemRegistry<Box<dyn FnMut()>> = ItemRegistry::new();
        let (first_hits, first_cb) = counter();
        let (second_hits, second_cb) = counter();
        let (replacement_hits, replacement_cb) = counter();

        registry.create("dup", Some(first_cb));
        registry.create("dup", Some(second_cb));

        assert!(registry.update("dup", replacement_cb));
        registry.dispatch_with(0, |f| f());
        registry.dispatch_with(1, |f| f());

        assert_eq!(first_hits.get(), 0);
        assert_eq!(replacement_hits.get(), 1);
        assert_eq!(second_hits.get(), 1);
    }

    #[test]
    fn update_with_unknown_name_changes_nothing() {
        let mut registry: ItemRegistry<Box<dyn FnMut()>> = ItemRegistry::new();
        let (hits, cb) = counter();
        registry.create("present", Some(cb));

        let (_, other) = counter();
        assert!(!registry.update("missing", other));

        registry.dispatch_with(0, |f| f());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn dispatch_tolerates_out_of_range_tags_and_missing_callbacks() {
        let mut registry: ItemRegistry<Box<dyn FnMut()>> = ItemRegistry::new();
        registry.create("no-callback", None);

        assert!(registry.dispatch_with(0, |f| f()).is_none());
        assert!(registry.dispatch_with(99, |f| f()).is_none());
    }
}
