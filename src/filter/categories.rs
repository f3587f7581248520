use mongodb::bson::Document;

/// Distinct category values in first-seen order. The full scan is
/// intentional: the collection is small and the storefront relies on the
/// order of first appearance, which a server-side distinct would not keep.
pub fn distinct_first_seen(docs: &[Document]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for doc in docs {
        if let Ok(category) = doc.get_str("foodCategory") {
            if !categories.iter().any(|c| c == category) {
                categories.push(category.to_string());
            }
        }
    }
    categories
}
