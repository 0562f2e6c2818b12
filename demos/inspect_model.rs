use std::env::args;

fn main() {
    env_logger::init();

    let model_path = args()
        .nth(1)
        .expect("Please provide the path to an XGBoost JSON model file");

    let ensemble = silvanus::load_file(&model_path).expect("Failed to parse XGBoost model");

    println!("trees:            {}", ensemble.trees.len());
    println!("num_feature:      {}", ensemble.param.num_feature);
    println!("num_output_group: {}", ensemble.param.num_output_group);
    println!("global_bias:      {}", ensemble.param.global_bias);
    println!("pred_transform:   {:?}", ensemble.param.pred_transform);

    for (i, tree) in ensemble.trees.iter().enumerate() {
        println!("  tree[{i}]: {} nodes", tree.num_nodes());
    }
}
