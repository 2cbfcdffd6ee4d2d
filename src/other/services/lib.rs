pub mod load_detail;
pub mod search;

#[cfg(test)]
mod testing;
