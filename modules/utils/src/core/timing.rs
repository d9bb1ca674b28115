//! Keyed single-shot timer bookkeeping.

mod timer_slot_key;
mod timer_slot_key_allocator;
mod timer_slots;

pub use timer_slot_key::TimerSlotKey;
pub use timer_slot_key_allocator::TimerSlotKeyAllocator;
pub use timer_slots::TimerSlots;
