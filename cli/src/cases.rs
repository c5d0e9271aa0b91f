//! The benchmark cases and how each one is timed
//!
//! Cases come in pairs: a benchy container and its std counterpart doing the
//! same work. Access and lookup cases fill their container before the clock
//! starts; push and insert cases build a fresh container inside every run.

use benchy::{Map, Vector};
use serde::Serialize;
use std::collections::BTreeMap;
use std::hint::black_box;
use std::num::TryFromIntError;
use std::time::{Duration, Instant};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Case {
    VectorPush,
    StdVecPush,
    VectorAccess,
    StdVecAccess,
    MapInsert,
    StdBtreemapInsert,
    MapLookup,
    StdBtreemapLookup,
    MapStringInsert,
    StdBtreemapStringInsert,
}

/// Run `work` `iterations` times and return the total wall-clock time.
fn time<T>(iterations: u32, mut work: impl FnMut() -> T) -> Duration {
    let start = Instant::now();
    for _ in 0..iterations {
        black_box(work());
    }
    start.elapsed()
}

impl Case {
    /// Whether this case needs random string keys.
    pub(crate) fn uses_keys(self) -> bool {
        matches!(self, Case::MapStringInsert | Case::StdBtreemapStringInsert)
    }

    /// Time `iterations` runs over `size` elements.
    ///
    /// String cases insert `keys`, which should hold `size` entries.
    /// Fails if `size` doesn't fit the `i32` elements the integer cases use.
    pub(crate) fn measure(
        self,
        size: usize,
        iterations: u32,
        keys: &[String],
    ) -> Result<Duration, TryFromIntError> {
        let n = i32::try_from(size)?;
        Ok(match self {
            Case::VectorPush => time(iterations, || {
                let mut v = Vector::new();
                for i in 0..n {
                    v.push(i);
                }
                v
            }),
            Case::StdVecPush => time(iterations, || {
                let mut v = Vec::new();
                for i in 0..n {
                    v.push(i);
                }
                v
            }),
            Case::VectorAccess => {
                let v: Vector<i32> = (0..n).collect();
                time(iterations, || {
                    for i in 0..v.len() {
                        // SAFETY: i < v.len()
                        black_box(unsafe { *v.get_unchecked(i) });
                    }
                })
            }
            Case::StdVecAccess => {
                let v: Vec<i32> = (0..n).collect();
                time(iterations, || {
                    for i in 0..v.len() {
                        black_box(v[i]);
                    }
                })
            }
            Case::MapInsert => time(iterations, || {
                let mut m = Map::new();
                for i in 0..n {
                    *m.get_or_insert_default(i) = i;
                }
                m
            }),
            Case::StdBtreemapInsert => time(iterations, || {
                let mut m = BTreeMap::new();
                for i in 0..n {
                    *m.entry(i).or_default() = i;
                }
                m
            }),
            Case::MapLookup => {
                let m: Map<i32, i32> = (0..n).map(|i| (i, i)).collect();
                time(iterations, || {
                    for i in 0..n {
                        black_box(m.get(&i));
                    }
                })
            }
            Case::StdBtreemapLookup => {
                let m: BTreeMap<i32, i32> = (0..n).map(|i| (i, i)).collect();
                time(iterations, || {
                    for i in 0..n {
                        black_box(m.get(&i));
                    }
                })
            }
            Case::MapStringInsert => time(iterations, || {
                let mut m = Map::new();
                for (i, key) in keys.iter().enumerate() {
                    *m.get_or_insert_default(key.clone()) = i;
                }
                m
            }),
            Case::StdBtreemapStringInsert => time(iterations, || {
                let mut m = BTreeMap::new();
                for (i, key) in keys.iter().enumerate() {
                    *m.entry(key.clone()).or_default() = i;
                }
                m
            }),
        })
    }
}
