pub struct Keybinds;

impl Default for Keybinds {
    fn default() -> Self {
        Self
    }
}

impl Keybinds {
    pub fn help_text(&self) -> String {
        r#"Keyboard Shortcuts:

Session:
  s             Start session (disabled while connected)
  t             Stop session
  l             Logout and unpair device

Buttons:
  Tab / →       Focus next button
  Shift+Tab / ← Focus previous button
  Enter / Space Press focused button
  Click         Press button

Backend:
  r             Refresh backend status
  c             Reopen event channel

General:
  ?             Toggle this help
  F12 / `       Toggle developer console
  q / Esc       Quit
  Ctrl + Q      Quit
"#
        .to_string()
    }

    pub fn footer_hint(&self) -> &'static str {
        "[s] start  [t] stop  [l] logout  [r] refresh  [c] reconnect  [?] help  [q] quit"
    }
}
