// Application layer: typed command groups on top of the client.

pub mod services;
