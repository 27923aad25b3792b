// src/common/id_generator.rs
//! Short prefixed identifiers
//!
//! Companies, jobs, applications and stored resumes get ids of the form
//! `<P>_<6 Crockford Base32 chars>`, e.g. `J_K7NP3X`. Users keep the id issued
//! by Clerk so the create-or-get upsert can key on it.

use rand::Rng;

/// Crockford Base32: digits and capitals without I, L, O and U
const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const BODY_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Company,
    Job,
    Application,
    Resume,
}

impl IdKind {
    pub fn prefix(self) -> char {
        match self {
            IdKind::Company => 'C',
            IdKind::Job => 'J',
            IdKind::Application => 'A',
            IdKind::Resume => 'R',
        }
    }

    pub fn new_id(self) -> String {
        let mut rng = rand::thread_rng();
        let mut id = String::with_capacity(BODY_LEN + 2);
        id.push(self.prefix());
        id.push('_');
        id.extend((0..BODY_LEN).map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char));
        id
    }

    /// Whether `id` has this kind's prefix and a well-formed body
    pub fn matches(self, id: &str) -> bool {
        let mut chars = id.chars();
        chars.next() == Some(self.prefix())
            && chars.next() == Some('_')
            && id.len() == BODY_LEN + 2
            && chars.all(|c| c.is_ascii() && ALPHABET.contains(&(c as u8)))
    }
}

pub fn generate_company_id() -> String {
    IdKind::Company.new_id()
}

pub fn generate_job_id() -> String {
    IdKind::Job.new_id()
}

pub fn generate_application_id() -> String {
    IdKind::Application.new_id()
}

pub fn generate_resume_id() -> String {
    IdKind::Resume.new_id()
}
