//! kopeck-core: Core types and keyword tables for the Kopeck fallback engine

pub mod emotion;
pub mod period;
pub mod sentiment;
pub mod time;
pub mod transaction;

pub use emotion::{Emotion, EmotionVector};
pub use period::PeriodWindow;
pub use sentiment::{
    EmotionReport, FriendlinessResult, Sentiment, analyze_emotions, score_friendliness,
};
pub use transaction::{Category, Transaction, TxnType};

/// Keyword-table classification of an amount's context window.
///
/// Tables are plain ordered slices: the first hit wins, so their order is part of
/// the observable behavior.
pub mod classifier {
    use super::{Category, TxnType};

    /// Stems that mark a spend
    pub const EXPENSE_KEYWORDS: &[&str] = &[
        "купил",
        "куплен",
        "покупк",
        "трат",
        "заплатил",
        "оплат",
        "расход",
        "отдал",
        "списа",
        "стоил",
        "стоит",
        "заказал",
    ];

    /// Stems that mark money received. Disjoint from [`EXPENSE_KEYWORDS`].
    pub const INCOME_KEYWORDS: &[&str] = &[
        "получил",
        "заработал",
        "зарплат",
        "доход",
        "преми",
        "поступ",
        "пришл",
        "прислал",
        "подарил",
        "перевел мне",
        "перевела мне",
        "отправил мне",
        "отправила мне",
        "мама отправила",
        "папа отправил",
        "дивиденд",
        "выигр",
        "кэшбэк",
        "аванс",
        "вернули",
    ];

    /// Category table in tie-break order
    pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
        (
            Category::Food,
            &[
                "хлеб", "молок", "продукт", "обед", "ужин", "завтрак", "кафе", "ресторан",
                "кофе", "пицц", "сникерс", "шоколад", "фрукт", "овощ", "мяс", "сыр",
                "пятерочк", "пятёрочк", "перекус", "доставку еды",
            ],
        ),
        (
            Category::Transport,
            &[
                "такси", "метро", "автобус", "бензин", "топлив", "проезд", "транспорт",
                "электричк", "парковк", "каршеринг", "заправк", "поезд",
            ],
        ),
        (
            Category::Entertainment,
            &[
                "кино", "театр", "концерт", "развлеч", "подписк", "боулинг", "музе",
                "netflix", "spotify", "игр",
            ],
        ),
        (
            Category::Health,
            &[
                "аптек", "лекарств", "врач", "больниц", "клиник", "стоматолог", "таблет",
                "витамин", "здоров",
            ],
        ),
        (
            Category::Shopping,
            &[
                "одежд", "обув", "кроссовк", "куртк", "джинс", "техник", "телефон",
                "ноутбук", "наушник", "маркетплейс", "wildberries", "ozon", "озон", "шопинг",
            ],
        ),
        (
            Category::Housing,
            &["аренд", "квартир", "ипотек", "жиль", "ремонт", "мебел"],
        ),
        (
            Category::Education,
            &["учеб", "курс", "книг", "обучен", "школ", "университет", "репетитор"],
        ),
        (
            Category::Bills,
            &[
                "коммунал", "интернет", "связь", "жкх", "электроэнерг", "штраф", "налог",
                "кредит", "счет за", "счёт за",
            ],
        ),
        (
            Category::Work,
            &["зарплат", "преми", "аванс", "оклад", "получк", "отпускн", "бонус"],
        ),
        (
            Category::Freelance,
            &["фриланс", "подработк", "заказчик", "халтур", "гонорар"],
        ),
        (
            Category::Investment,
            &["дивиденд", "инвест", "акци", "облигац", "вклад", "купон", "брокер"],
        ),
        (
            Category::Gift,
            &["подар", "мама", "папа", "родител", "бабушк", "дедушк"],
        ),
    ];

    /// Result of classifying one context window
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Classification {
        pub kind: TxnType,
        pub category: Category,
        /// False when the type fell back to the expense default
        pub type_found: bool,
        /// False when the category fell back to Other
        pub category_found: bool,
    }

    fn contains_any(haystack: &str, needles: &[&str]) -> bool {
        needles.iter().any(|n| haystack.contains(n))
    }

    /// Income only when an income keyword is present and no expense keyword is.
    /// `None` when the text carries neither.
    pub fn resolve_type(text: &str) -> Option<TxnType> {
        let text = text.to_lowercase();
        if contains_any(&text, EXPENSE_KEYWORDS) {
            return Some(TxnType::Expense);
        }
        if contains_any(&text, INCOME_KEYWORDS) {
            return Some(TxnType::Income);
        }
        None
    }

    /// First category in table order with a keyword hit
    pub fn resolve_category(text: &str) -> Option<Category> {
        let text = text.to_lowercase();
        CATEGORY_KEYWORDS
            .iter()
            .find(|(_, words)| contains_any(&text, words))
            .map(|(category, _)| *category)
    }

    /// Classify a context window. Unknown type is an expense, unknown category is Other.
    pub fn classify(window: &str) -> Classification {
        let kind = resolve_type(window);
        let category = resolve_category(window);
        Classification {
            kind: kind.unwrap_or(TxnType::Expense),
            category: category.unwrap_or_default(),
            type_found: kind.is_some(),
            category_found: category.is_some(),
        }
    }

}

pub use classifier::{Classification, classify};
