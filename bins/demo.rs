use models::Warehouse;

fn main() {
    let juice = Warehouse::with_capacity(100.0);
    let beer = Warehouse::new(100.0, 20.2);

    println!("After creation:");
    println!("Juice warehouse: {juice}");
    println!("Beer warehouse: {beer}");
}
