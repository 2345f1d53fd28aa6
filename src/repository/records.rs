//! On-disk layout of the save file.
//!
//! Field names follow the historical file format so existing save files keep
//! loading: `titulo`, `autor`, `emprestimos`, `contador_id`, ...

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{timestamp, Book, Loan};

use super::LedgerSnapshot;

#[derive(Debug, Serialize, Deserialize)]
pub struct LedgerFile {
    #[serde(default, alias = "livros")]
    pub books: Vec<BookRecord>,
    #[serde(default)]
    pub emprestimos: Vec<LoanRecord>,
    #[serde(default = "first_id")]
    pub contador_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contador_emprestimo: Option<i32>,
}

fn first_id() -> i32 {
    1
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: i32,
    pub titulo: String,
    pub autor: String,
    pub ano: i32,
    pub categoria: String,
    pub disponivel: bool,
    #[serde(with = "timestamp")]
    pub data_cadastro: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoanRecord {
    pub id: i32,
    pub livro_id: i32,
    pub pessoa: String,
    #[serde(with = "timestamp")]
    pub data_emprestimo: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub data_vencimento: DateTime<Utc>,
    pub devolvido: bool,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub data_devolucao: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multa: Option<f64>,
}

impl From<&Book> for BookRecord {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            titulo: book.title.clone(),
            autor: book.author.clone(),
            ano: book.year,
            categoria: book.category.clone(),
            disponivel: book.available,
            data_cadastro: book.registered_at,
        }
    }
}

impl From<BookRecord> for Book {
    fn from(record: BookRecord) -> Self {
        Self {
            id: record.id,
            title: record.titulo,
            author: record.autor,
            year: record.ano,
            category: record.categoria,
            available: record.disponivel,
            registered_at: record.data_cadastro,
        }
    }
}

impl From<&Loan> for LoanRecord {
    fn from(loan: &Loan) -> Self {
        Self {
            id: loan.id,
            livro_id: loan.book_id,
            pessoa: loan.borrower.clone(),
            data_emprestimo: loan.loaned_at,
            data_vencimento: loan.due_at,
            devolvido: loan.returned,
            data_devolucao: loan.returned_at,
            multa: loan.fine,
        }
    }
}

impl From<LoanRecord> for Loan {
    fn from(record: LoanRecord) -> Self {
        Self {
            id: record.id,
            book_id: record.livro_id,
            borrower: record.pessoa,
            loaned_at: record.data_emprestimo,
            due_at: record.data_vencimento,
            returned: record.devolvido,
            returned_at: record.data_devolucao,
            fine: record.multa,
        }
    }
}

impl From<&LedgerSnapshot> for LedgerFile {
    fn from(snapshot: &LedgerSnapshot) -> Self {
        Self {
            books: snapshot.books.iter().map(BookRecord::from).collect(),
            emprestimos: snapshot.loans.iter().map(LoanRecord::from).collect(),
            contador_id: snapshot.next_book_id,
            contador_emprestimo: snapshot.next_loan_id,
        }
    }
}

impl From<LedgerFile> for LedgerSnapshot {
    fn from(file: LedgerFile) -> Self {
        Self {
            books: file.books.into_iter().map(Book::from).collect(),
            loans: file.emprestimos.into_iter().map(Loan::from).collect(),
            next_book_id: file.contador_id,
            next_loan_id: file.contador_emprestimo,
        }
    }
}
