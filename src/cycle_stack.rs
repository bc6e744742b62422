use std::collections::hash_map::DefaultHasher;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use super::components::{Component, ComponentTraits, HasArenaContainer, Ref};

/// How stack elements are compared for duplicate detection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EqualityMode {
    /// Two elements collide only if they denote the same object.
    Identity,
    /// Two elements collide if they are equal values.
    Value,
}

/// Element type usable in a [`CycleCheckStack`].
///
/// Supplies a hash and an equivalence relation per [`EqualityMode`]. For
/// arena handles the two modes coincide, since the handle value *is* the
/// component's identity; for shared pointers, identity means pointer
/// equality and value means the pointee's `Eq`.
pub trait CollisionKey {
    fn collision_hash(&self, mode: EqualityMode) -> u64;
    fn collision_eq(&self, other: &Self, mode: EqualityMode) -> bool;
}

fn hash_value<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

impl<R> CollisionKey for Ref<R>
where
    R: Component,
    ComponentTraits: HasArenaContainer<R>,
{
    fn collision_hash(&self, _mode: EqualityMode) -> u64 {
        hash_value(&self.index())
    }

    fn collision_eq(&self, other: &Self, _mode: EqualityMode) -> bool {
        self == other
    }
}

impl<T: Hash + Eq> CollisionKey for Rc<T> {
    fn collision_hash(&self, mode: EqualityMode) -> u64 {
        match mode {
            EqualityMode::Identity => hash_value(&(Rc::as_ptr(self) as usize)),
            EqualityMode::Value => hash_value(&**self),
        }
    }

    fn collision_eq(&self, other: &Self, mode: EqualityMode) -> bool {
        match mode {
            EqualityMode::Identity => Rc::ptr_eq(self, other),
            EqualityMode::Value => **self == **other,
        }
    }
}

/// The chain table is sized for the expected duplicate-check workload, not
/// for the stack's capacity; it bounds chain length and never grows.
const BUCKET_COUNT: usize = 17;

/// Stack that detects, in amortized constant time, whether a pushed element
/// is already on the stack.
///
/// Every recursive graph traversal in this crate pushes the component it is
/// about to enter, recurses, and pops on the way out; a `true` result from
/// [`push`](Self::push) means the traversal has reached a component that is
/// already on the current path, i.e. a reference cycle.
///
/// The duplicate check is a fixed-bucket hash table chained through stack
/// positions: each slot carries the previous head of its bucket, so push and
/// pop touch O(1) slots and growing the stack is a plain array copy. The
/// stack is also readable as an ordered sequence, bottom to top, via
/// [`get`](Self::get) and [`len`](Self::len).
pub struct CycleCheckStack<E> {
    data: Vec<E>,
    /// Per-slot chain link, kept in lock-step with `data`.
    /// `0` terminates a chain, `p > 0` links to stack position `p - 1`, and
    /// `-1` marks a slot pushed without duplicate registration.
    next: Vec<isize>,
    /// Bucket heads, same `0` / `p + 1` encoding as `next`.
    buckets: [isize; BUCKET_COUNT],
    mode: EqualityMode,
    latest_push_result: bool,
}

impl<E: CollisionKey> Default for CycleCheckStack<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CollisionKey> CycleCheckStack<E> {
    /// Creates an empty stack in [identity mode](EqualityMode::Identity).
    pub fn new() -> Self {
        Self::with_mode(EqualityMode::Identity)
    }

    pub fn with_mode(mode: EqualityMode) -> Self {
        Self {
            data: Vec::new(),
            next: Vec::new(),
            buckets: [0; BUCKET_COUNT],
            mode,
            latest_push_result: false,
        }
    }

    pub fn mode(&self) -> EqualityMode {
        self.mode
    }

    /// Changes the equality mode. Only permitted while the stack is empty;
    /// switching with elements on the stack would invalidate their bucket
    /// placement, so doing so is a contract violation and panics.
    pub fn set_mode(&mut self, mode: EqualityMode) {
        assert!(
            self.data.is_empty(),
            "equality mode changed on a non-empty stack"
        );
        self.mode = mode;
    }

    fn bucket(&self, element: &E) -> usize {
        (element.collision_hash(self.mode) % BUCKET_COUNT as u64) as usize
    }

    fn find_in_bucket(&self, element: &E, bucket: usize) -> bool {
        let mut link = self.buckets[bucket];
        while link > 0 {
            let position = (link - 1) as usize;
            if element.collision_eq(&self.data[position], self.mode) {
                return true;
            }
            link = self.next[position];
        }
        false
    }

    /// Pushes a new element onto the stack.
    ///
    /// Returns `true` iff the element is already on the stack under the
    /// active equality mode. The element is pushed either way.
    pub fn push(&mut self, element: E) -> bool {
        let bucket = self.bucket(&element);
        let duplicate = self.find_in_bucket(&element, bucket);
        self.next.push(self.buckets[bucket]);
        self.buckets[bucket] = self.data.len() as isize + 1;
        self.data.push(element);
        self.latest_push_result = duplicate;
        duplicate
    }

    /// Pushes a new element without making it participate in duplicate
    /// detection. Used when the caller already knows no cycle can pass
    /// through this frame.
    pub fn push_no_check(&mut self, element: E) {
        self.next.push(-1);
        self.data.push(element);
    }

    /// Checks whether `element` is on the stack, without pushing it.
    /// Elements pushed via [`push_no_check`](Self::push_no_check) are never
    /// found.
    pub fn find_duplicate(&self, element: &E) -> bool {
        self.find_in_bucket(element, self.bucket(element))
    }

    /// Result of the most recent checked push.
    pub fn latest_push_result(&self) -> bool {
        self.latest_push_result
    }

    /// Removes and returns the top element, restoring the duplicate-check
    /// state to exactly what it was before the matching push.
    /// Popping an empty stack is a contract violation and panics.
    pub fn pop(&mut self) -> E {
        let element = self.data.pop().expect("pop on an empty stack");
        let link = self.next.pop().expect("chain table out of sync");
        if link >= 0 {
            let bucket = self.bucket(&element);
            debug_assert_eq!(self.buckets[bucket], self.data.len() as isize + 1);
            self.buckets[bucket] = link;
        }
        element
    }

    /// The top of the stack. Panics if the stack is empty.
    pub fn peek(&self) -> &E {
        self.data.last().expect("peek on an empty stack")
    }

    /// Reads the element at `position`, where position 0 is the bottom of
    /// the stack.
    pub fn get(&self, position: usize) -> &E {
        &self.data[position]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Clears all elements and all duplicate-tracking state. A no-op on an
    /// empty stack.
    pub fn reset(&mut self) {
        if !self.data.is_empty() {
            self.data.clear();
            self.next.clear();
            self.buckets = [0; BUCKET_COUNT];
        }
        self.latest_push_result = false;
    }

    /// Renders the cycle ending at the current top element, formatting each
    /// element with `format`.
    ///
    /// Precondition: the top element is a known duplicate of some element
    /// below it. The walk goes from the top down to the first element equal
    /// to the top under the active mode, producing `"top -> ... -> match"`.
    /// Only matches against the top element are considered, so a stack with
    /// several repeated elements still yields one canonical trail per call.
    pub fn cycle_string_with(&self, mut format: impl FnMut(&E) -> String) -> String {
        let mut position = self.len() - 1;
        let top = &self.data[position];
        let mut trail = format(top);
        loop {
            trail.push_str(" -> ");
            position -= 1;
            let current = &self.data[position];
            trail.push_str(&format(current));
            if top.collision_eq(current, self.mode) {
                break;
            }
        }
        trail
    }

    /// [`cycle_string_with`](Self::cycle_string_with) using the elements'
    /// `Display` implementations.
    pub fn cycle_string(&self) -> String
    where
        E: Display,
    {
        self.cycle_string_with(|element| element.to_string())
    }
}
