//! Value cell with a last-modified timestamp.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::namespace::{Namespace, Stamped};

/// Typed view over a [`Stamped`] entry in a [`Namespace`].
///
/// Binding is idempotent: the first bind creates `{value: initial, timestamp: now}`, later binds
/// reuse the stored entry. Every write refreshes the timestamp.
pub struct TimestampedValue<'a, T> {
    cell: &'a mut Stamped,
    _value: PhantomData<T>,
}

impl<'a, T> TimestampedValue<'a, T>
where
    T: Serialize + DeserializeOwned,
{
    /// Binds to `name` in `namespace`, creating it with `initial` when absent.
    pub fn get(namespace: &'a mut Namespace, name: &str, initial: T) -> Self {
        let cell = namespace.stamped_or_insert_with(name, || {
            Stamped::new(serde_json::to_value(initial).unwrap_or(serde_json::Value::Null))
        });
        Self {
            cell,
            _value: PhantomData,
        }
    }

    /// Current value; `None` when the stored value is null or not a `T`.
    pub fn value(&self) -> Option<T> {
        serde_json::from_value(self.cell.value.clone()).ok()
    }

    /// Time of the last write.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.cell.timestamp
    }

    /// Sets the value and refreshes the timestamp.
    pub fn set_value(&mut self, value: T) {
        self.set_value_at(value, Utc::now());
    }

    pub(crate) fn set_value_at(&mut self, value: T, now: DateTime<Utc>) {
        let value = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
        *self.cell = Stamped::at(value, now);
    }
}
