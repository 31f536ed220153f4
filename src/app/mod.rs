// Application layer: the interactive operator session.

pub mod shell;
