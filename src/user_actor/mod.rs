//! Store-side behaviour of user records: id assignment and the email index.

mod entity;
