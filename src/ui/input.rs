/// Discrete commands decoded from raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    OpenPicker,
    BeginRecording,
    EndRecording,
    Snapshot,
    /// Nothing pressed during the poll window.
    Idle,
}

impl InputEvent {
    /// Decodes a highgui `wait_key` result. Keys are case-sensitive.
    pub fn from_key(code: i32) -> Self {
        if code < 0 {
            return InputEvent::Idle;
        }

        match (code & 0xFF) as u8 {
            b'q' => InputEvent::Quit,
            b's' => InputEvent::OpenPicker,
            b'b' => InputEvent::BeginRecording,
            b'e' => InputEvent::EndRecording,
            b' ' => InputEvent::Snapshot,
            _ => InputEvent::Idle,
        }
    }
}
