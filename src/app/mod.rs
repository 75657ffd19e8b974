// Front ends over the controller: one-shot commands and the interactive shell.

pub mod commands;
pub mod shell;
