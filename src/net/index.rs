//! Typed handles for net elements.
//!
//! Vertices, half-edges and faces live in three arenas owned by the net and
//! refer to each other through these handles instead of pointers. Every
//! handle is generic over the underlying integer so small nets can use `u16`
//! and very large ones `u64`. The all-ones value of the integer is reserved
//! as the "unset" sentinel.

use std::fmt::{self, Debug, Display};
use std::hash::Hash;

/// Integer types usable as arena indices.
pub trait NetIndex: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// Sentinel meaning "no element".
    const INVALID: Self;

    /// Convert from usize.
    ///
    /// # Panics
    /// Panics if the value does not fit or collides with [`INVALID`](Self::INVALID).
    fn from_usize(v: usize) -> Self;

    /// Convert from usize, or `None` if the value does not fit below the
    /// sentinel.
    fn try_from_usize(v: usize) -> Option<Self>;

    /// Convert to usize.
    fn to_usize(self) -> usize;

    /// Check that this is not the sentinel.
    #[inline]
    fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

macro_rules! impl_net_index {
    ($($ty:ty),*) => {
        $(
            impl NetIndex for $ty {
                const INVALID: Self = <$ty>::MAX;

                #[inline]
                fn from_usize(v: usize) -> Self {
                    match Self::try_from_usize(v) {
                        Some(i) => i,
                        None => panic!("index {} too large for {}", v, stringify!($ty)),
                    }
                }

                #[inline]
                fn try_from_usize(v: usize) -> Option<Self> {
                    <$ty>::try_from(v).ok().filter(|&i| i != <$ty>::MAX)
                }

                #[inline]
                fn to_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_net_index!(u16, u32, u64);

/// Handle of a vertex.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId<I: NetIndex = u32>(I);

/// Handle of a half-edge.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct HalfEdgeId<I: NetIndex = u32>(I);

/// Handle of a face.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId<I: NetIndex = u32>(I);

macro_rules! impl_handle {
    ($name:ident, $tag:literal) => {
        impl<I: NetIndex> $name<I> {
            /// Create a handle from a raw arena slot.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(I::from_usize(index))
            }

            /// The "unset" handle.
            #[inline]
            pub fn invalid() -> Self {
                Self(I::INVALID)
            }

            /// Raw arena slot.
            #[inline]
            pub fn index(self) -> usize {
                self.0.to_usize()
            }

            /// Raw value of the underlying integer.
            #[inline]
            pub fn raw(self) -> I {
                self.0
            }

            /// Whether this handle is set.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0.is_valid()
            }

            /// `Some(self)` when set, `None` for the sentinel.
            #[inline]
            pub fn get(self) -> Option<Self> {
                if self.is_valid() {
                    Some(self)
                } else {
                    None
                }
            }
        }

        impl<I: NetIndex> Debug for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $tag, self.index())
                } else {
                    write!(f, "{}(-)", $tag)
                }
            }
        }

        impl<I: NetIndex> Display for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                Debug::fmt(self, f)
            }
        }

        impl<I: NetIndex> Default for $name<I> {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl<I: NetIndex> From<usize> for $name<I> {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_handle!(VertexId, "V");
impl_handle!(HalfEdgeId, "H");
impl_handle!(FaceId, "F");
