/// One frame worth of palette indices, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuantizedFrame {
    width: u32,
    height: u32,
    indices: Vec<u8>,
}

impl QuantizedFrame {
    pub fn new(width: u32, height: u32, indices: Vec<u8>) -> Self {
        Self {
            width,
            height,
            indices,
        }
    }

    /// Builds a frame from rows of equal length.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.as_ref().len()) as u32;
        let indices = rows.iter().flat_map(|row| row.as_ref().iter().copied()).collect();

        Self::new(width, height, indices)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn index(&self, cell: usize) -> u8 {
        self.indices[cell]
    }
}
