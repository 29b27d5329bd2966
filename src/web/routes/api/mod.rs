pub mod waitlist;

pub use waitlist::join_waitlist;
