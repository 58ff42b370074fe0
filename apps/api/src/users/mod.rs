// Profile of the token's subject: read, edit, and account deletion.

pub mod handlers;
