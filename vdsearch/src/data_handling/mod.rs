pub mod cm_file;
pub mod tblout;
