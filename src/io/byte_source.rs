use bytes::Bytes;

/// Random-access view over an immutable byte buffer.
///
/// The tag decoder never reads through anything but this trait, so every
/// access is bounds checked against [`ByteSource::len`]. Implementations must
/// return `None` rather than panic when the requested range is out of bounds.
pub trait ByteSource {
    /// Total number of readable bytes.
    fn len(&self) -> usize;

    /// Borrow exactly `len` bytes starting at `offset`.
    ///
    /// Returns `None` if any part of the range lies outside the source.
    fn bytes_at(&self, offset: usize, len: usize) -> Option<&[u8]>;

    /// Whether the source holds no bytes at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that `len` bytes starting at `offset` are readable.
    ///
    /// Uses overflow-checked arithmetic so hostile offsets near `usize::MAX`
    /// can't wrap around into range.
    #[inline]
    fn contains(&self, offset: usize, len: usize) -> bool {
        offset
            .checked_add(len)
            .is_some_and(|end| end <= self.len())
    }

    /// Read `N` bytes into a fixed-size array.
    #[inline]
    fn array_at<const N: usize>(&self, offset: usize) -> Option<[u8; N]> {
        self.bytes_at(offset, N)?.try_into().ok()
    }
}

impl ByteSource for [u8] {
    #[inline]
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    #[inline]
    fn bytes_at(&self, offset: usize, len: usize) -> Option<&[u8]> {
        let end = offset.checked_add(len)?;
        self.get(offset..end)
    }
}

impl ByteSource for Vec<u8> {
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn bytes_at(&self, offset: usize, len: usize) -> Option<&[u8]> {
        self.as_slice().bytes_at(offset, len)
    }
}

impl ByteSource for Bytes {
    #[inline]
    fn len(&self) -> usize {
        self.as_ref().len()
    }

    #[inline]
    fn bytes_at(&self, offset: usize, len: usize) -> Option<&[u8]> {
        self.as_ref().bytes_at(offset, len)
    }
}
