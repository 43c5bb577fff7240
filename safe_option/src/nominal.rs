use std::slice;

/// Marker embedded at the start of every [`SOption`][crate::SOption] instance.
///
/// The string names the crate, not a crate version, so instances made by two
/// independently compiled copies of this library (different versions in one
/// dependency graph, or across a dynamic library boundary) carry the same
/// bytes and recognize each other.
pub const UNIVERSAL_NOMINALITY: &str = "crates.io/safe_option/SOption";

pub(crate) const NOMINAL_LEN: usize = UNIVERSAL_NOMINALITY.len();

pub(crate) type NominalTag = [u8; NOMINAL_LEN];

const fn nominal_tag() -> NominalTag {
    let src = UNIVERSAL_NOMINALITY.as_bytes();
    let mut tag = [0; NOMINAL_LEN];
    let mut i = 0;
    while i < NOMINAL_LEN {
        tag[i] = src[i];
        i += 1;
    }
    tag
}

pub(crate) const NOMINAL_TAG: NominalTag = nominal_tag();

/// Structural check for "is this value an [`SOption`][crate::SOption]".
///
/// Compares the leading bytes of `candidate` against
/// [`UNIVERSAL_NOMINALITY`]. A `TypeId` comparison would reject an instance
/// produced by a different compiled copy of this crate; the byte marker does
/// not. Values smaller than the marker are never options.
pub fn is_option<C>(candidate: &C) -> bool {
    if std::mem::size_of::<C>() < NOMINAL_LEN {
        return false;
    }
    // Every option instance, whichever copy of the crate made it, starts
    // with the nominal tag at offset 0.
    let head = unsafe { slice::from_raw_parts((candidate as *const C).cast::<u8>(), NOMINAL_LEN) };
    head == NOMINAL_TAG
}

#[cfg(test)]
mod tests {
    use super::{is_option, NOMINAL_LEN};
    use crate::SOption;

    // Same layout an older or newer copy of this crate would produce.
    #[repr(C)]
    struct ForeignCopy {
        nominal: [u8; NOMINAL_LEN],
        is_some: bool,
        value: u64,
    }

    #[test]
    fn recognizes_own_instances() {
        assert!(is_option(&SOption::some(1)));
        assert!(is_option(&SOption::<String>::none()));
        assert!(is_option(&SOption::some(SOption::some("nested"))));
    }

    #[test]
    fn recognizes_instances_of_an_independent_copy() {
        let foreign = ForeignCopy {
            nominal: *b"crates.io/safe_option/SOption",
            is_some: true,
            value: 7,
        };
        assert!(foreign.is_some);
        assert_eq!(foreign.value, 7);
        assert!(is_option(&foreign));
    }

    #[test]
    fn rejects_lookalikes_and_plain_values() {
        let mut wrong_marker = ForeignCopy {
            nominal: *b"crates.io/safe_option/SOption",
            is_some: false,
            value: 0,
        };
        wrong_marker.nominal[0] = b'x';
        assert!(!is_option(&wrong_marker));

        assert!(!is_option(&5u8));
        assert!(!is_option(&0u64));
        assert!(!is_option(&[0u8; NOMINAL_LEN]));
        // a &str is a (pointer, length) pair, smaller than the marker itself
        assert!(!is_option(&"crates.io/safe_option/SOption"));
        assert!(!is_option(&String::from("crates.io/safe_option/SOption")));
        assert!(!is_option(&Some(1)));
    }
}
