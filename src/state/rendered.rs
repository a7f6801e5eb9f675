/// Last value pushed to the DOM, so unchanged markup is not rewritten.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rendered<T> {
    last: Option<T>,
}

impl<T: Copy + PartialEq> Rendered<T> {
    /// Record `value`; true when it differs from what was rendered before.
    pub fn update(&mut self, value: T) -> bool {
        if self.last == Some(value) {
            return false;
        }
        self.last = Some(value);
        true
    }
}
