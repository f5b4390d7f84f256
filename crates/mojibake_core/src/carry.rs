/// Concatenate two optional byte runs; absent operands act as identity.
pub fn concat(a: Option<&[u8]>, b: Option<&[u8]>) -> Vec<u8> {
    match (a, b) {
        (None, None) => Vec::new(),
        (Some(only), None) | (None, Some(only)) => only.to_vec(),
        (Some(a), Some(b)) => {
            let mut combined = Vec::with_capacity(a.len() + b.len());
            combined.extend_from_slice(a);
            combined.extend_from_slice(b);
            combined
        }
    }
}

/// Single-slot holder for the unconverted tail of the previous chunk.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CarryBuffer {
    slot: Option<Vec<u8>>,
}

impl CarryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put bytes that precede the first chunk (e.g. a non-BOM stream head) in the slot.
    pub fn seed(&mut self, bytes: &[u8]) {
        self.slot = (!bytes.is_empty()).then(|| bytes.to_vec());
    }

    pub fn as_slice(&self) -> Option<&[u8]> {
        self.slot.as_deref()
    }

    pub fn len(&self) -> usize {
        self.slot.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// What `hand_off` would return, without touching the slot.
    pub fn preview(&self, chunk: &[u8], split: usize) -> Vec<u8> {
        concat(self.as_slice(), Some(&chunk[..split]))
    }

    /// Build the combined buffer for `chunk[..split]` and keep `chunk[split..]`
    /// as the new carry.
    pub fn hand_off(&mut self, chunk: &[u8], split: usize) -> Vec<u8> {
        let (prefix, tail) = chunk.split_at(split);
        let combined = concat(self.slot.take().as_deref(), Some(prefix));
        self.seed(tail);
        combined
    }

    /// Drain the slot together with the final partial chunk.
    pub fn finish(&mut self, last: &[u8]) -> Vec<u8> {
        let last = (!last.is_empty()).then_some(last);
        concat(self.slot.take().as_deref(), last)
    }
}
