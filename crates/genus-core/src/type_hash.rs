//! Deterministic hash-based type identity.
//!
//! [`TypeHash`] is a 64-bit hash computed from a class name (or from the
//! identities a composite type is built from). Because the hash is a pure
//! function of the name, a host can compute identities before a class is
//! registered, and two registries that agree on names agree on hashes.
//!
//! # Hash Computation
//!
//! Uses XXHash64 with domain-specific mixing constants so that a class named
//! `T` and a type variable named `T` never collide.
//!
//! # Examples
//!
//! ```
//! use genus_core::TypeHash;
//!
//! let list = TypeHash::from_name("java.util.List");
//! assert_eq!(list, TypeHash::from_name("java.util.List"));
//!
//! // Argument order matters
//! let string = TypeHash::from_name("java.lang.String");
//! let integer = TypeHash::from_name("java.lang.Integer");
//! let map = TypeHash::from_name("java.util.Map");
//! assert_ne!(
//!     TypeHash::from_parameterized(map, &[string, integer]),
//!     TypeHash::from_parameterized(map, &[integer, string]),
//! );
//! ```

use std::fmt;
use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
pub mod hash_constants {
    /// Separator constant used when folding argument hashes.
    pub const SEP: u64 = 0x4bc94d6bd06053ad;

    /// Domain marker for nominal class hashes.
    pub const CLASS: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for array hashes.
    pub const ARRAY: u64 = 0x6a09e667f3bcc909;

    /// Domain marker for type variable hashes.
    pub const VARIABLE: u64 = 0x1a095090689d4647;

    /// Argument position mixing constants.
    /// Each position gets its own constant so argument order matters.
    pub const ARG_MARKERS: [u64; 16] = [
        0x9e3779b97f4a7c15,
        0xbf58476d1ce4e5b9,
        0x94d049bb133111eb,
        0xd6e8feb86659fd93,
        0xe7037ed1a0b428db,
        0xc6a4a7935bd1e995,
        0x8648dbbc94d49b8d,
        0xa2b48b2c69e0d657,
        0x7c3e9f2a5b8d1403,
        0x5d8c7b4a3e9f2106,
        0x3f1e9d8c7b5a4203,
        0x1a2b3c4d5e6f7089,
        0x9f8e7d6c5b4a3210,
        0x2468ace013579bdf,
        0xfdb97531eca86420,
        0x0f1e2d3c4b5a6978,
    ];
}

/// A deterministic 64-bit hash identifying a class, array or type variable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a type hash from a dotted class name.
    ///
    /// ```
    /// use genus_core::TypeHash;
    ///
    /// let a = TypeHash::from_name("java.lang.String");
    /// let b = TypeHash::from_name("java.lang.String");
    /// assert_eq!(a, b);
    /// ```
    #[inline]
    pub fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::CLASS ^ xxh64(name.as_bytes(), 0))
    }

    /// Create the hash of a `dims`-dimensional array over the base class
    /// `base`. Zero dimensions give `base` itself.
    #[inline]
    pub fn from_array(base: TypeHash, dims: u32) -> Self {
        if dims == 0 {
            return base;
        }
        TypeHash(
            base.0
                .wrapping_mul(hash_constants::SEP)
                .wrapping_add(hash_constants::ARRAY ^ u64::from(dims)),
        )
    }

    /// Create the hash of a parameterized instantiation.
    ///
    /// Argument order matters: `Map<String, Integer>` and `Map<Integer, String>`
    /// hash differently.
    #[inline]
    pub fn from_parameterized(raw: TypeHash, args: &[TypeHash]) -> Self {
        let mut hash = raw.0;
        for (i, arg) in args.iter().enumerate() {
            let marker = hash_constants::ARG_MARKERS
                .get(i)
                .copied()
                .unwrap_or_else(|| hash_constants::ARG_MARKERS[0].wrapping_add(i as u64));
            // wrapping_mul keeps the fold order-sensitive (XOR alone would commute)
            hash = hash
                .wrapping_mul(hash_constants::SEP)
                .wrapping_add(marker ^ arg.0);
        }
        TypeHash(hash)
    }

    /// Create the hash of the type variable `name` declared on `owner`.
    #[inline]
    pub fn from_variable(owner: TypeHash, name: &str) -> Self {
        TypeHash(hash_constants::VARIABLE ^ owner.0 ^ xxh64(name.as_bytes(), 0))
    }

    /// Check if this is an empty/invalid hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
