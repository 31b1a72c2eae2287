pub mod columns;
pub mod view;
