pub mod intrusive_list;
pub mod key_iter;
pub mod linked_map;
pub mod slot_arena;
pub mod ternary_tree;

pub use intrusive_list::IntrusiveList;
pub use key_iter::{KeyIterator, PathIterator, StringIterator};
pub use linked_map::{LinkedMap, Touch};
pub use slot_arena::{SlotArena, SlotId};
pub use ternary_tree::{Iter, PathTree, StringTree, TernarySearchTree, Values};
