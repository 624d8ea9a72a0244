//! Script text normalisation.
//!
//! Turns raw script source into units that each hold one statement piece,
//! one `{` or one `}`, every unit tagged with the source line it came from.
//! Comments (`/* */`, `//`, `#`) are removed. Nothing inside a double-quoted
//! string is split or stripped.

/// One normalised unit of script text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub text: String,
    /// 1-based line of the original source
    pub line: usize,
}

impl SourceLine {
    pub fn new(text: impl Into<String>, line: usize) -> Self {
        SourceLine {
            text: text.into(),
            line,
        }
    }
}

struct Normalizer {
    units: Vec<SourceLine>,
    buffer: String,
    /// Line of the first character in `buffer`
    start: Option<usize>,
    line: usize,
}

impl Normalizer {
    fn push(&mut self, ch: char) {
        let ch = if ch == '\t' { ' ' } else { ch };
        if ch == ' ' {
            // collapse runs, drop leading blanks
            if self.buffer.is_empty() || self.buffer.ends_with(' ') {
                return;
            }
        } else if self.start.is_none() {
            self.start = Some(self.line);
        }
        self.buffer.push(ch);
    }

    /// Pushes a character from inside a string literal, unchanged.
    fn push_raw(&mut self, ch: char) {
        if self.start.is_none() {
            self.start = Some(self.line);
        }
        self.buffer.push(ch);
    }

    fn flush(&mut self) {
        let text = self.buffer.trim_end();
        if let (false, Some(line)) = (text.is_empty(), self.start) {
            self.units.push(SourceLine::new(text, line));
        }
        self.buffer.clear();
        self.start = None;
    }
}

/// Splits `source` into [`SourceLine`] units.
pub fn normalize(source: &str) -> Vec<SourceLine> {
    let mut out = Normalizer {
        units: Vec::new(),
        buffer: String::new(),
        start: None,
        line: 1,
    };
    let chars: Vec<char> = source.chars().collect();
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if c == '\n' {
            // an unterminated string stops at the end of its line
            in_string = false;
            out.flush();
            out.line += 1;
            i += 1;
            continue;
        }
        if c == '\r' {
            i += 1;
            continue;
        }

        if in_string {
            if c == '"' {
                in_string = false;
            }
            out.push_raw(c);
            i += 1;
            continue;
        }

        match (c, next) {
            ('"', _) => {
                in_string = true;
                out.push(c);
                i += 1;
            }
            ('/', Some('*')) => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    if chars[i] == '\n' {
                        out.flush();
                        out.line += 1;
                    }
                    i += 1;
                }
                // skip the closing `*/`
                i += 2;
                // the comment separates what is around it
                out.push(' ');
            }
            ('/', Some('/')) | ('#', _) => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            ('{', _) | ('}', _) => {
                out.flush();
                out.push(c);
                out.flush();
                i += 1;
            }
            (';', _) => {
                out.push(c);
                out.flush();
                i += 1;
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }
    out.flush();
    out.units
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(units: &[SourceLine]) -> Vec<(&str, usize)> {
        units.iter().map(|u| (u.text.as_str(), u.line)).collect()
    }

    #[test]
    fn test_braces_and_semicolons_split() {
        let units = normalize("if (a) { b = 1; c = 2; } else {d=3;}");
        assert_eq!(
            texts(&units),
            vec![
                ("if (a)", 1),
                ("{", 1),
                ("b = 1;", 1),
                ("c = 2;", 1),
                ("}", 1),
                ("else", 1),
                ("{", 1),
                ("d=3;", 1),
                ("}", 1),
            ]
        );
    }

    #[test]
    fn test_comments_keep_line_numbers() {
        let source = "a = 1; // first\n/* multi\nline */ b = 2;\n# shell\n\tc  =  3;";
        let units = normalize(source);
        assert_eq!(
            texts(&units),
            vec![("a = 1;", 1), ("b = 2;", 3), ("c = 3;", 5)]
        );
    }

    #[test]
    fn test_strings_are_left_alone() {
        let units = normalize("print(\"a;  {b} // c\", x);");
        assert_eq!(texts(&units), vec![("print(\"a;  {b} // c\", x);", 1)]);
    }

    #[test]
    fn test_statement_spanning_lines() {
        let units = normalize("x = 1 +\n  2;");
        assert_eq!(texts(&units), vec![("x = 1 +", 1), ("2;", 2)]);
    }
}
