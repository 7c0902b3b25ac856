mod main_test;
mod reference_panel_test;
