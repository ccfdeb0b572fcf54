pub mod stratified_splitter;

pub use stratified_splitter::{Partition, StratifiedSplitter};
