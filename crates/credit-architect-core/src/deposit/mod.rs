pub mod term_deposit;
