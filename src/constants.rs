pub const MAX_DEPTH: usize = 256;

/// Characters that force a property name into `['...']` form when rendering
/// node paths.
pub(crate) const PATH_SPECIAL_CHARS: &[u8] = b".[]()'\" ";

#[inline]
pub fn is_path_special_byte(byte: u8) -> bool {
    PATH_SPECIAL_CHARS.contains(&byte)
}
