use token_huffman::{decode, process_document};

fn main() {
    let document = "The quick brown fox jumps over the lazy dog. The dog sleeps.\n\n\
                    Buffalo buffalo Buffalo buffalo buffalo buffalo Buffalo buffalo!\n\n\
                    To be, or not to be; that is the question.";

    let analyses = process_document(document).expect("blocks encode");

    for (index, analysis) in analyses.iter().enumerate() {
        println!("=== Block {} ===", index);

        println!("Frequencies (descending):");
        for (token, count) in analysis.frequencies().sorted_desc() {
            println!("  {:<10} {}", token, count);
        }

        println!("Codes:");
        for line in analysis.codes().lines() {
            println!("  {}", line);
        }

        println!("Tree:");
        print!("{}", analysis.tree().render());

        let stats = analysis.stats();
        println!("Encoded: {}", analysis.encoded().preview(64));
        println!(
            "{} tokens in {} bits ({:.2} bits/token, {:.1}% of fixed width)",
            stats.token_count,
            stats.encoded_bits,
            stats.average_code_length(),
            stats.compression_ratio()
        );

        let decoded = decode(analysis.encoded(), analysis.codes()).expect("own bits decode");
        assert_eq!(decoded, analysis.tokens());
        println!();
    }
}
