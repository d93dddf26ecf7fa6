//! Test host implementation for in-memory I/O testing.
//!
//! This module provides a test implementation of the `IoHost` trait that uses
//! in-memory buffers instead of a real terminal. This enables testing the REPL
//! loop without requiring terminal interaction.

use std::collections::VecDeque;

use super::{InputLine, IoError, IoHost, Output, OutputStyle, PromptConfig, Signal};

/// Test host with in-memory I/O buffers.
///
/// Input lines and signals are queued and consumed in order. Once both
/// queues are drained the host reports end of input, so a session that
/// never types `exit` still terminates.
#[derive(Debug, Default)]
pub struct TestHost {
    input_queue: VecDeque<String>,
    signal_queue: VecDeque<Signal>,
    output_buffer: Vec<Output>,
    last_prompt: Option<PromptConfig>,
    field_names: Vec<String>,
    flush_count: usize,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an input line to be returned by `read_input()`.
    pub fn queue_input(&mut self, line: impl Into<String>) {
        self.input_queue.push_back(line.into());
    }

    /// Queue multiple input lines.
    pub fn queue_inputs(&mut self, lines: impl IntoIterator<Item = impl Into<String>>) {
        for line in lines {
            self.queue_input(line);
        }
    }

    /// Queue a signal to be returned by `read_signal()`.
    pub fn queue_signal(&mut self, signal: Signal) {
        self.signal_queue.push_back(signal);
    }

    /// Get all output that was written.
    pub fn output(&self) -> &[Output] {
        &self.output_buffer
    }

    /// Get output text only, concatenated.
    pub fn output_text(&self) -> String {
        self.output_buffer
            .iter()
            .map(|o| o.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Get output of a specific style.
    pub fn output_with_style(&self, style: OutputStyle) -> Vec<&str> {
        self.output_buffer
            .iter()
            .filter(|o| o.style == style)
            .map(|o| o.text.as_str())
            .collect()
    }

    /// Get all error output.
    pub fn errors(&self) -> Vec<&str> {
        self.output_with_style(OutputStyle::Error)
    }

    /// Get the last prompt configuration, if any.
    pub fn last_prompt(&self) -> Option<&PromptConfig> {
        self.last_prompt.as_ref()
    }

    /// Field names most recently registered for completion.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    pub fn flush_count(&self) -> usize {
        self.flush_count
    }
}

impl IoHost for TestHost {
    fn wait_for_input(&mut self) -> Result<(), IoError> {
        if self.input_queue.is_empty() && self.signal_queue.is_empty() {
            self.signal_queue.push_back(Signal::Eof);
        }
        Ok(())
    }

    fn read_input(&mut self) -> Result<Option<InputLine>, IoError> {
        Ok(self.input_queue.pop_front().map(|line| InputLine { line }))
    }

    fn read_signal(&mut self) -> Result<Option<Signal>, IoError> {
        Ok(self.signal_queue.pop_front())
    }

    fn write_output(&mut self, output: Output) -> Result<(), IoError> {
        self.output_buffer.push(output);
        Ok(())
    }

    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError> {
        self.last_prompt = Some(config);
        Ok(())
    }

    fn set_field_names(&mut self, fields: Vec<String>) -> Result<(), IoError> {
        self.field_names = fields;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IoError> {
        self.flush_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_input_returns_queued_in_order() {
        let mut host = TestHost::new();
        host.queue_inputs(["first", "second"]);

        assert_eq!(host.read_input().unwrap().unwrap().line, "first");
        assert_eq!(host.read_input().unwrap().unwrap().line, "second");
        assert!(host.read_input().unwrap().is_none());
    }

    #[test]
    fn signals_come_before_synthetic_eof() {
        let mut host = TestHost::new();
        host.queue_signal(Signal::Interrupt);

        host.wait_for_input().unwrap();
        assert!(matches!(host.read_signal().unwrap(), Some(Signal::Interrupt)));
        assert!(host.read_signal().unwrap().is_none());
    }

    #[test]
    fn drained_host_reports_eof() {
        let mut host = TestHost::new();
        host.wait_for_input().unwrap();
        assert!(matches!(host.read_signal().unwrap(), Some(Signal::Eof)));
    }

    #[test]
    fn pending_input_suppresses_eof() {
        let mut host = TestHost::new();
        host.queue_input("show");
        host.wait_for_input().unwrap();
        assert!(host.read_signal().unwrap().is_none());
    }

    #[test]
    fn output_with_style_filters() {
        let mut host = TestHost::new();
        host.write_output(Output::normal("normal")).unwrap();
        host.write_output(Output::error("error")).unwrap();
        host.write_output(Output::info("info")).unwrap();

        assert_eq!(host.errors(), vec!["error"]);
        assert_eq!(host.output_with_style(OutputStyle::Info), vec!["info"]);
        assert_eq!(host.output_text(), "normalerrorinfo");
    }

    #[test]
    fn write_prompt_stores_config() {
        let mut host = TestHost::new();
        assert!(host.last_prompt().is_none());

        host.write_prompt(PromptConfig {
            record_label: "Front Door".to_string(),
            dirty: true,
        })
        .unwrap();

        let prompt = host.last_prompt().unwrap();
        assert_eq!(prompt.record_label, "Front Door");
        assert!(prompt.dirty);
    }

    #[test]
    fn field_names_are_replaced() {
        let mut host = TestHost::new();
        host.set_field_names(vec!["name".to_string()]).unwrap();
        host.set_field_names(vec!["name".to_string(), "width".to_string()])
            .unwrap();
        assert_eq!(host.field_names(), ["name", "width"]);
    }

    #[test]
    fn flush_increments_counter() {
        let mut host = TestHost::new();
        host.flush().unwrap();
        host.flush().unwrap();
        assert_eq!(host.flush_count(), 2);
    }
}
