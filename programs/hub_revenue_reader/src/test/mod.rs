pub mod test_accounting;
