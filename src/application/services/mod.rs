//! Business logic services for the application layer.

pub mod link_allocator;
pub mod quota_tracker;

pub use link_allocator::LinkAllocator;
pub use quota_tracker::QuotaTracker;
