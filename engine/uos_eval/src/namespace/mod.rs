//! Variable namespaces.
//!
//! A namespace is a named bucket of aliases (name to object handle), lists
//! and timers. The registry always holds the `global` namespace, which is
//! shared with code outside the scripting core. Scripts may run in an
//! isolated namespace instead, named after the script file.

use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

use crate::errors::{item_not_found, namespace_exists, namespace_not_found, EvalResult};
use crate::{SharedMutableRegistry, Value};

/// Name of the namespace that always exists.
pub const GLOBAL_NAMESPACE: &str = "global";

/// A stopwatch that can be set to an arbitrary elapsed value.
#[derive(Copy, Clone, Debug)]
pub struct Timer {
    started: Instant,
    offset: Duration,
}

impl Timer {
    /// A timer reading zero now.
    pub fn start() -> Self {
        Self::starting_at(Duration::ZERO)
    }

    /// A timer that reads `elapsed` now.
    pub fn starting_at(elapsed: Duration) -> Self {
        Timer {
            started: Instant::now(),
            offset: elapsed,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed() + self.offset
    }

    /// Make the timer read `elapsed` now and keep counting from there.
    pub fn set(&mut self, elapsed: Duration) {
        *self = Self::starting_at(elapsed);
    }
}

/// Which part of a namespace an operation touches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Category {
    All,
    Alias,
    Lists,
    Timers,
}

impl Category {
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "all" => Some(Self::All),
            "alias" | "aliases" => Some(Self::Alias),
            "list" | "lists" => Some(Self::Lists),
            "timer" | "timers" => Some(Self::Timers),
            _ => None,
        }
    }

    fn includes(self, other: Category) -> bool {
        self == Category::All || self == other
    }
}

/// What `move` does when the target namespace already exists.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum MoveMode {
    #[default]
    ErrorIfExists,
    /// Add the moved items to the target; moved items win on conflict.
    Merge,
    /// Throw the target away first.
    Replace,
}

impl MoveMode {
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "merge" => Some(Self::Merge),
            "replace" => Some(Self::Replace),
            _ => None,
        }
    }
}

/// One namespace's aliases, lists and timers.
#[derive(Clone, Debug, Default)]
pub struct Namespace {
    aliases: FxHashMap<String, u32>,
    lists: FxHashMap<String, Vec<Value>>,
    timers: FxHashMap<String, Timer>,
}

impl Namespace {
    // Aliases

    #[inline]
    pub fn alias(&self, name: &str) -> Option<u32> {
        self.aliases.get(name).copied()
    }

    #[inline]
    pub fn set_alias(&mut self, name: impl Into<String>, serial: u32) {
        self.aliases.insert(name.into(), serial);
    }

    pub fn remove_alias(&mut self, name: &str) -> bool {
        self.aliases.remove(name).is_some()
    }

    pub fn has_alias(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    /// Alias names in sorted order.
    pub fn alias_names(&self) -> Vec<&str> {
        sorted_keys(&self.aliases)
    }

    // Lists

    #[inline]
    pub fn list(&self, name: &str) -> Option<&[Value]> {
        self.lists.get(name).map(Vec::as_slice)
    }

    #[inline]
    pub fn list_mut(&mut self, name: &str) -> Option<&mut Vec<Value>> {
        self.lists.get_mut(name)
    }

    /// Create an empty list. Returns `false` if it already existed.
    pub fn create_list(&mut self, name: impl Into<String>) -> bool {
        let mut created = false;
        self.lists.entry(name.into()).or_insert_with(|| {
            created = true;
            Vec::new()
        });
        created
    }

    pub fn remove_list(&mut self, name: &str) -> bool {
        self.lists.remove(name).is_some()
    }

    pub fn has_list(&self, name: &str) -> bool {
        self.lists.contains_key(name)
    }

    pub fn list_names(&self) -> Vec<&str> {
        sorted_keys(&self.lists)
    }

    // Timers

    /// Elapsed time of a timer.
    #[inline]
    pub fn timer(&self, name: &str) -> Option<Duration> {
        self.timers.get(name).map(Timer::elapsed)
    }

    /// Start (or restart) a timer at zero.
    pub fn create_timer(&mut self, name: impl Into<String>) {
        self.timers.insert(name.into(), Timer::start());
    }

    /// Set a timer's elapsed value, creating it if needed.
    pub fn set_timer(&mut self, name: impl Into<String>, elapsed: Duration) {
        self.timers
            .entry(name.into())
            .and_modify(|timer| timer.set(elapsed))
            .or_insert_with(|| Timer::starting_at(elapsed));
    }

    pub fn remove_timer(&mut self, name: &str) -> bool {
        self.timers.remove(name).is_some()
    }

    pub fn has_timer(&self, name: &str) -> bool {
        self.timers.contains_key(name)
    }

    pub fn timer_names(&self) -> Vec<&str> {
        sorted_keys(&self.timers)
    }

    // Whole namespace

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty() && self.lists.is_empty() && self.timers.is_empty()
    }

    pub fn clear(&mut self) {
        self.aliases.clear();
        self.lists.clear();
        self.timers.clear();
    }

    /// Move every item of `other` into `self`, replacing same-named items.
    pub fn merge_from(&mut self, other: Namespace) {
        self.aliases.extend(other.aliases);
        self.lists.extend(other.lists);
        self.timers.extend(other.timers);
    }

    /// Copy a whole category into `dst`.
    fn copy_category(&self, dst: &mut Namespace, category: Category) {
        if category.includes(Category::Alias) {
            dst.aliases
                .extend(self.aliases.iter().map(|(k, v)| (k.clone(), *v)));
        }
        if category.includes(Category::Lists) {
            dst.lists
                .extend(self.lists.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        if category.includes(Category::Timers) {
            dst.timers
                .extend(self.timers.iter().map(|(k, v)| (k.clone(), *v)));
        }
    }

    /// Copy one named item into `dst` under `dst_item`.
    ///
    /// With [`Category::All`] every category holding `item` is copied.
    /// Returns whether anything was found.
    fn copy_item(&self, dst: &mut Namespace, category: Category, item: &str, dst_item: &str) -> bool {
        let mut found = false;
        if category.includes(Category::Alias) {
            if let Some(serial) = self.alias(item) {
                dst.set_alias(dst_item, serial);
                found = true;
            }
        }
        if category.includes(Category::Lists) {
            if let Some(list) = self.lists.get(item) {
                dst.lists.insert(dst_item.to_string(), list.clone());
                found = true;
            }
        }
        if category.includes(Category::Timers) {
            if let Some(timer) = self.timers.get(item) {
                dst.timers.insert(dst_item.to_string(), *timer);
                found = true;
            }
        }
        found
    }
}

fn sorted_keys<V>(map: &FxHashMap<String, V>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

/// All namespaces by name.
#[derive(Clone, Debug)]
pub struct NamespaceRegistry {
    namespaces: FxHashMap<String, Namespace>,
}

impl NamespaceRegistry {
    /// A registry holding an empty global namespace.
    pub fn new() -> Self {
        let mut namespaces = FxHashMap::default();
        namespaces.insert(GLOBAL_NAMESPACE.to_string(), Namespace::default());
        NamespaceRegistry { namespaces }
    }

    /// Get a namespace, creating it on first use.
    pub fn get(&mut self, name: &str) -> &mut Namespace {
        self.namespaces.entry(name.to_string()).or_default()
    }

    pub fn find(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.get(name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Namespace> {
        self.namespaces.get_mut(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.namespaces.contains_key(name)
    }

    pub fn global(&mut self) -> &mut Namespace {
        self.get(GLOBAL_NAMESPACE)
    }

    /// Delete a namespace. The global namespace is only cleared.
    ///
    /// Returns whether the namespace existed.
    pub fn delete(&mut self, name: &str) -> bool {
        if name == GLOBAL_NAMESPACE {
            self.global().clear();
            return true;
        }
        self.namespaces.remove(name).is_some()
    }

    /// Namespace names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.namespaces.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Rename `old` to `new`: copy it over, then delete `old`.
    pub fn move_namespace(&mut self, old: &str, new: &str, mode: MoveMode) -> EvalResult<()> {
        if old == new {
            return Ok(());
        }
        let source = self
            .namespaces
            .get(old)
            .cloned()
            .ok_or_else(|| namespace_not_found(old))?;
        match (self.has(new), mode) {
            (true, MoveMode::ErrorIfExists) => return Err(namespace_exists(new)),
            (true, MoveMode::Merge) => self.get(new).merge_from(source),
            _ => {
                self.namespaces.insert(new.to_string(), source);
            }
        }
        self.delete(old);
        Ok(())
    }

    /// Copy from `src` into `dst`, creating `dst` if needed.
    ///
    /// Without `item` the whole category is copied. With `item`, only that
    /// item is, renamed to `dst_item` when given.
    pub fn copy(
        &mut self,
        src: &str,
        dst: &str,
        category: Category,
        item: Option<&str>,
        dst_item: Option<&str>,
    ) -> EvalResult<()> {
        let source = self
            .namespaces
            .get(src)
            .cloned()
            .ok_or_else(|| namespace_not_found(src))?;
        let target = self.get(dst);
        match item {
            None => source.copy_category(target, category),
            Some(item) => {
                if !source.copy_item(target, category, item, dst_item.unwrap_or(item)) {
                    return Err(item_not_found(src, item));
                }
            }
        }
        Ok(())
    }

    pub fn copy_alias(
        &mut self,
        src: &str,
        dst: &str,
        item: Option<&str>,
        dst_item: Option<&str>,
    ) -> EvalResult<()> {
        self.copy(src, dst, Category::Alias, item, dst_item)
    }

    pub fn copy_lists(
        &mut self,
        src: &str,
        dst: &str,
        item: Option<&str>,
        dst_item: Option<&str>,
    ) -> EvalResult<()> {
        self.copy(src, dst, Category::Lists, item, dst_item)
    }

    pub fn copy_timers(
        &mut self,
        src: &str,
        dst: &str,
        item: Option<&str>,
        dst_item: Option<&str>,
    ) -> EvalResult<()> {
        self.copy(src, dst, Category::Timers, item, dst_item)
    }

    pub fn copy_all(
        &mut self,
        src: &str,
        dst: &str,
        item: Option<&str>,
        dst_item: Option<&str>,
    ) -> EvalResult<()> {
        self.copy(src, dst, Category::All, item, dst_item)
    }
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Namespace registry shared between interpreters and the host.
pub type SharedNamespaces = SharedMutableRegistry<NamespaceRegistry>;

/// A fresh shared registry holding only the global namespace.
pub fn shared_namespaces() -> SharedNamespaces {
    SharedMutableRegistry::new(NamespaceRegistry::new())
}

#[cfg(test)]
mod tests;
