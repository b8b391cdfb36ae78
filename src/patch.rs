use crate::error::{PatchError, Result};
use regex::bytes::Regex;

/// The `head` table magic number, `0x5F0F3CF5`.
pub const HEAD_MAGIC: [u8; 4] = [0x5F, 0x0F, 0x3C, 0xF5];
/// Units per em of the fonts being patched (Source Han Sans).
pub const SOURCE_UPM: u16 = 1000;
/// Units per em of the companion family (Gen Jyuu Gothic).
pub const TARGET_UPM: u16 = 1024;

/// A compiled units-per-em rewrite.
///
/// The signature is the `head` magic number, followed by the two bytes of
/// `head.flags` (matched but never changed), followed by `unitsPerEm`. Only
/// the first occurrence in a buffer is ever rewritten; nothing about the
/// font structure is parsed or validated.
#[derive(Debug, Clone)]
pub struct UpmPatch {
    from: u16,
    to: u16,
    signature: Regex,
}

fn escape_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!(r"\x{:02X}", b)).collect()
}

impl UpmPatch {
    pub fn new(from: u16, to: u16) -> Result<Self> {
        // `s` so the flags may contain 0x0A, `-u` so \xNN means a raw byte
        let source = format!(
            "(?s-u){}(?P<flags>..){}",
            escape_bytes(&HEAD_MAGIC),
            escape_bytes(&from.to_be_bytes())
        );
        log::debug!("Compiled head signature {}", source);
        let signature = Regex::new(&source).map_err(|source| PatchError::BadPattern { source })?;
        Ok(UpmPatch {
            from,
            to,
            signature,
        })
    }

    pub fn from(&self) -> u16 {
        self.from
    }

    pub fn to(&self) -> u16 {
        self.to
    }

    /// Offset of the first matching signature, if any.
    pub fn find(&self, data: &[u8]) -> Option<usize> {
        self.signature.find(data).map(|m| m.start())
    }

    /// Rewrites `unitsPerEm` in the first matching signature and returns
    /// the offset of that signature. The buffer is untouched if there is
    /// no match.
    pub fn apply(&self, data: &mut [u8]) -> Option<usize> {
        let (start, end) = {
            let found = self.signature.find(data)?;
            (found.start(), found.end())
        };
        data[end - 2..end].copy_from_slice(&self.to.to_be_bytes());
        Some(start)
    }

    pub fn patched(&self, data: &[u8]) -> Vec<u8> {
        let mut out = data.to_vec();
        self.apply(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn standard() -> UpmPatch {
        UpmPatch::new(SOURCE_UPM, TARGET_UPM).unwrap()
    }

    #[test]
    fn test_no_signature_is_identity() {
        let data = b"OTTO\x00\x0b\x00\x80\x00\x03\x00\x30CFF ".to_vec();
        assert_eq!(standard().patched(&data), data);
        assert_eq!(standard().find(&data), None);
    }

    #[test]
    fn test_magic_without_source_upm_is_identity() {
        let data = vec![0x5F, 0x0F, 0x3C, 0xF5, 0x00, 0x03, 0x08, 0x00];
        let mut patched = data.clone();
        assert_eq!(standard().apply(&mut patched), None);
        assert_eq!(patched, data);
    }

    #[test]
    fn test_patches_head() {
        let data = vec![
            0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x50, 0x00, 0x5F, 0x0F, 0x3C, 0xF5, 0x00, 0x64,
            0x03, 0xE8, 0x00, 0x00, 0x00, 0x00,
        ];
        let expected = vec![
            0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x50, 0x00, 0x5F, 0x0F, 0x3C, 0xF5, 0x00, 0x64,
            0x04, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        let mut patched = data.clone();
        assert_eq!(standard().apply(&mut patched), Some(8));
        assert_eq!(patched, expected);
        assert_eq!(patched.len(), data.len());
    }

    #[test]
    fn test_flags_may_be_any_byte() {
        for flags in &[[0x0A, 0x0A], [0x00, 0x00], [0xFF, 0xFF], [0x0D, 0x0A]] {
            let data = vec![
                0x5F, 0x0F, 0x3C, 0xF5, flags[0], flags[1], 0x03, 0xE8,
            ];
            assert_eq!(
                standard().patched(&data),
                vec![0x5F, 0x0F, 0x3C, 0xF5, flags[0], flags[1], 0x04, 0x00]
            );
        }
    }

    #[test]
    fn test_only_first_occurrence() {
        let sig = [0x5F, 0x0F, 0x3C, 0xF5, 0x00, 0x0B, 0x03, 0xE8];
        let mut data = vec![0xAA; 3];
        data.extend_from_slice(&sig);
        data.extend_from_slice(&[0xBB; 5]);
        data.extend_from_slice(&sig);

        let patched = standard().patched(&data);
        assert_eq!(&patched[3..11], &[0x5F, 0x0F, 0x3C, 0xF5, 0x00, 0x0B, 0x04, 0x00]);
        assert_eq!(&patched[11..16], &[0xBB; 5]);
        assert_eq!(&patched[16..], &sig);
        assert_eq!(standard().find(&patched), Some(16));
    }

    #[test]
    fn test_second_application_is_noop() {
        let data = vec![0x01, 0x5F, 0x0F, 0x3C, 0xF5, 0x00, 0x64, 0x03, 0xE8, 0x02];
        let once = standard().patched(&data);
        let mut twice = once.clone();
        assert_eq!(standard().apply(&mut twice), None);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_custom_values() {
        let patch = UpmPatch::new(2048, 1000).unwrap();
        assert_eq!(patch.from(), 2048);
        assert_eq!(patch.to(), 1000);
        let data = vec![0x5F, 0x0F, 0x3C, 0xF5, 0x00, 0x1F, 0x08, 0x00];
        assert_eq!(
            patch.patched(&data),
            vec![0x5F, 0x0F, 0x3C, 0xF5, 0x00, 0x1F, 0x03, 0xE8]
        );
        // The default signature does not match a 2048 UPM font
        assert_eq!(standard().patched(&data), data);
    }

    #[test]
    fn test_truncated_signature() {
        let data = vec![0x5F, 0x0F, 0x3C, 0xF5, 0x00, 0x64, 0x03];
        assert_eq!(standard().find(&data), None);
        assert_eq!(standard().patched(&[]), Vec::<u8>::new());
    }
}
