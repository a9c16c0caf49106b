//! The augmented sort key.
//!
//! An object store has no directories: `imported./x`, `imported/y` and
//! `imported0` are just keys, sorted byte by byte. Sorting the children of one
//! directory by bare name would put the directory `imported` before the file
//! `imported.`, yet `imported.` < `imported/y` because `.` (0x2E) sorts below
//! `/` (0x2F). Appending the separator to directory names before comparing
//! makes each directory sort exactly where its contents would in a flat list.

use std::cmp::Ordering;

/// Path separator used by object-store keys.
pub const SEPARATOR: u8 = b'/';

/// Build the augmented key for a child: its name, plus `/` if it is a
/// directory.
pub fn augmented_key(name: &[u8], is_dir: bool) -> Vec<u8> {
    let mut key = Vec::with_capacity(name.len() + 1);
    key.extend_from_slice(name);
    if is_dir {
        key.push(SEPARATOR);
    }
    key
}

/// Compare two children of the same directory by augmented key, without
/// allocating.
pub fn compare_augmented(a: &[u8], a_is_dir: bool, b: &[u8], b_is_dir: bool) -> Ordering {
    let a_key = a.iter().chain(a_is_dir.then_some(&SEPARATOR));
    let b_key = b.iter().chain(b_is_dir.then_some(&SEPARATOR));
    a_key.cmp(b_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_appends_separator_to_directories() {
        assert_eq!(augmented_key(b"sub", true), b"sub/".to_vec());
        assert_eq!(augmented_key(b"sub", false), b"sub".to_vec());
    }

    #[test]
    fn dot_file_sorts_before_same_named_directory() {
        assert_eq!(
            compare_augmented(b"imported.", false, b"imported", true),
            Ordering::Less
        );
    }

    #[test]
    fn digit_file_sorts_after_same_named_directory() {
        assert_eq!(
            compare_augmented(b"imported0", false, b"imported", true),
            Ordering::Greater
        );
    }

    #[test]
    fn bare_names_would_order_differently() {
        // Plain name order puts the directory first; the augmented key does not.
        assert!(b"imported".as_slice() < b"imported.".as_slice());
        assert_eq!(
            compare_augmented(b"imported", true, b"imported.", false),
            Ordering::Greater
        );
    }

    #[test]
    fn comparison_matches_allocated_keys() {
        let names: [(&[u8], bool); 6] = [
            (b"a", true),
            (b"a", false),
            (b"a.", false),
            (b"a0", true),
            (b"a,", true),
            (b"", false),
        ];
        for (a, a_dir) in names {
            for (b, b_dir) in names {
                assert_eq!(
                    compare_augmented(a, a_dir, b, b_dir),
                    augmented_key(a, a_dir).cmp(&augmented_key(b, b_dir)),
                );
            }
        }
    }
}
