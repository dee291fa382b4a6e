//! The diagnostic log the poll loop writes decoded codes to.

/// A line-oriented text sink, in the manner of a serial console.
pub trait CodeLog {
    /// Append text to the current line.
    fn print(&mut self, text: &str);

    /// Append text and end the line.
    fn println(&mut self, text: &str);
}

impl<T: CodeLog + ?Sized> CodeLog for &mut T {
    fn print(&mut self, text: &str) {
        (**self).print(text);
    }

    fn println(&mut self, text: &str) {
        (**self).println(text);
    }
}

// Tee: every write goes to both logs, in order.
impl<A: CodeLog, B: CodeLog> CodeLog for (A, B) {
    fn print(&mut self, text: &str) {
        self.0.print(text);
        self.1.print(text);
    }

    fn println(&mut self, text: &str) {
        self.0.println(text);
        self.1.println(text);
    }
}

/// A [`CodeLog`] over `defmt`. Text is buffered until `println`, then emitted as one `info!` line.
#[cfg(feature = "defmt")]
#[derive(Default)]
pub struct DefmtLog {
    line: heapless::String<64>,
}

#[cfg(feature = "defmt")]
impl DefmtLog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            line: heapless::String::new(),
        }
    }

    fn push(&mut self, text: &str) {
        for ch in text.chars() {
            if self.line.push(ch).is_err() {
                defmt::warn!("DefmtLog line full, text truncated");
                break;
            }
        }
    }
}

#[cfg(feature = "defmt")]
impl CodeLog for DefmtLog {
    fn print(&mut self, text: &str) {
        self.push(text);
    }

    fn println(&mut self, text: &str) {
        self.push(text);
        defmt::info!("{}", self.line.as_str());
        self.line.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::string::String;
    use std::vec::Vec;

    use super::CodeLog;

    #[derive(Default)]
    struct Lines {
        current: String,
        done: Vec<String>,
    }

    impl CodeLog for Lines {
        fn print(&mut self, text: &str) {
            self.current.push_str(text);
        }

        fn println(&mut self, text: &str) {
            self.current.push_str(text);
            self.done.push(core::mem::take(&mut self.current));
        }
    }

    #[test]
    fn tee_writes_both_sides() {
        let mut left = Lines::default();
        let mut right = Lines::default();
        {
            let mut tee = (&mut left, &mut right);
            tee.print("Received IR code: 0x");
            tee.println("FF");
        }
        assert_eq!(left.done, ["Received IR code: 0xFF"]);
        assert_eq!(right.done, ["Received IR code: 0xFF"]);
    }
}
