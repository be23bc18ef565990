pub mod flat_file_map;
pub mod project_node;
pub mod read_project_tree;
