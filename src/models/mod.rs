/// A single row of the `notes` table. Timestamps are opaque strings supplied
/// by the client; the server stores and orders them, it never generates them.
#[derive(Debug, Clone)]
pub struct Note {
    pub id: String,
    pub date_key: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}
