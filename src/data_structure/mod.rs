pub mod sl_list;
