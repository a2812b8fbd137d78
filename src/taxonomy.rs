/// Reporting-side category taxonomy: a node is either a leaf category or an
/// ordered list of labeled children. Kept separate from the closed enum the
/// rule engine assigns; this tree is for display and budgeting views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryNode {
    Leaf,
    Branch(Vec<(String, CategoryNode)>),
}

impl CategoryNode {
    /// Collapse the tree into dotted leaf paths, depth-first in declaration
    /// order: `spending.wants.dining.treats`.
    pub fn flatten(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.walk("", &mut paths);
        paths
    }

    fn walk(&self, prefix: &str, out: &mut Vec<String>) {
        match self {
            CategoryNode::Leaf => out.push(prefix.to_string()),
            CategoryNode::Branch(children) => {
                for (label, child) in children {
                    let path = if prefix.is_empty() {
                        label.clone()
                    } else {
                        format!("{prefix}.{label}")
                    };
                    child.walk(&path, out);
                }
            }
        }
    }
}

fn branch(children: Vec<(&str, CategoryNode)>) -> CategoryNode {
    CategoryNode::Branch(
        children
            .into_iter()
            .map(|(label, child)| (label.to_string(), child))
            .collect(),
    )
}

/// The stock hierarchy: income, spending split into needs / shoulds /
/// wants (shoulds being the deliberate middle ground between them), and
/// transfers. Every level carries an `uncategorized` leaf.
pub fn default_tree() -> CategoryNode {
    use CategoryNode::Leaf;
    branch(vec![
        (
            "income",
            branch(vec![
                ("gift", Leaf),
                ("salary", Leaf),
                ("atm", Leaf),
                ("uncategorized", Leaf),
            ]),
        ),
        (
            "spending",
            branch(vec![
                ("atm", Leaf),
                (
                    "needs",
                    branch(vec![
                        ("rent", Leaf),
                        ("utilities", Leaf),
                        ("home", Leaf),
                        ("health", Leaf),
                        ("loans", Leaf),
                        ("uncategorized", Leaf),
                    ]),
                ),
                (
                    "shoulds",
                    branch(vec![
                        ("grocery", Leaf),
                        ("fitness", Leaf),
                        ("services", Leaf),
                        ("commuting", Leaf),
                        ("uncategorized", Leaf),
                    ]),
                ),
                (
                    "wants",
                    branch(vec![
                        (
                            "dining",
                            branch(vec![
                                ("treats", Leaf),
                                ("dates", Leaf),
                                ("friends", Leaf),
                                ("solo", Leaf),
                                ("uncategorized", Leaf),
                            ]),
                        ),
                        (
                            "shopping",
                            branch(vec![
                                ("clothes", Leaf),
                                ("hobbies", Leaf),
                                ("gift", Leaf),
                                ("uncategorized", Leaf),
                            ]),
                        ),
                        (
                            "entertainment",
                            branch(vec![
                                ("alcohol", Leaf),
                                ("shows", Leaf),
                                ("sober fun", Leaf),
                                ("uncategorized", Leaf),
                            ]),
                        ),
                        (
                            "travel",
                            branch(vec![
                                ("lodging", Leaf),
                                ("transportation", Leaf),
                                ("food", Leaf),
                                ("activities", Leaf),
                                ("shopping", Leaf),
                                ("uncategorized", Leaf),
                            ]),
                        ),
                    ]),
                ),
            ]),
        ),
        (
            "transfers",
            branch(vec![
                ("credit card payments", Leaf),
                ("stocks", Leaf),
                ("long-term cash", Leaf),
                ("uncategorized", Leaf),
            ]),
        ),
        ("uncategorized", Leaf),
    ])
}
