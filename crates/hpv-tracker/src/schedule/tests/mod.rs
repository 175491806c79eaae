mod common;
mod doses;
mod due_dates;
