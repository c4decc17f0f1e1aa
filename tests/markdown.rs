#[path = "markdown/render_reply.rs"]
mod render_reply;
