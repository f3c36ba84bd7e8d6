//! Line-oriented writer for brace-delimited text backends.

const INDENT_WIDTH: usize = 4;

pub struct CodeWriter {
    output: String,
    indent: usize,
}

impl CodeWriter {
    /// Create a writer whose first line starts at the given indentation level.
    pub fn new(indent: usize) -> Self {
        Self {
            output: String::new(),
            indent,
        }
    }

    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.output.push_str(&" ".repeat(self.indent * INDENT_WIDTH));
        self.output.push_str(text.as_ref());
        self.output.push('\n');
        self
    }

    /// Write `header` followed by an opening brace on its own line.
    pub fn open(&mut self, header: impl AsRef<str>) -> &mut Self {
        self.line(header);
        self.line("{");
        self.indent += 1;
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        self.line("}")
    }

    pub fn finish(self) -> String {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_blocks() {
        let mut writer = CodeWriter::new(1);
        writer.open("class A").line("int x;").open("void F()").close().close();
        assert_eq!(
            writer.finish(),
            "    class A\n    {\n        int x;\n        void F()\n        {\n        }\n    }\n"
        );
    }
}
