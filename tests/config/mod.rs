mod loader;
mod merge;
