/// Display a byte slice of ASCII bases as text.
#[derive(Debug, Default)]
pub struct ByteStr<B>(pub B);

impl<B: AsRef<[u8]>> std::fmt::Display for ByteStr<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .as_ref()
                .iter()
                .map(|&b| b as char)
                .collect::<String>()
        )
    }
}

/// Nanomolar to molar
pub fn nano(n: f64) -> f64 {
    n * 1e-9
}

/// Millimolar to molar
pub fn milli(n: f64) -> f64 {
    n * 1e-3
}
